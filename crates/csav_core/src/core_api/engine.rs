use std::fs;
use std::path::Path;

use crate::layout::FileLayout;
use crate::save::{DecodeOptions, SaveRecord};
use crate::stats::Statistics;

use super::error::CoreError;

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine {
    options: DecodeOptions,
}

/// One decoded save together with everything derived from it.
#[derive(Debug, Clone)]
pub struct Session {
    record: SaveRecord,
    statistics: Statistics,
    layout: FileLayout,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    pub fn open_bytes<B: AsRef<[u8]>>(&self, bytes: B) -> Result<Session, CoreError> {
        let bytes = bytes.as_ref();
        let layout = FileLayout::for_len(bytes.len())?;
        let record = SaveRecord::decode_with(bytes, self.options)?;
        let statistics = Statistics::compute(&record);
        Ok(Session {
            record,
            statistics,
            layout,
        })
    }

    /// Reads the whole file in one call; the handle is closed before decoding.
    pub fn open_path<P: AsRef<Path>>(&self, path: P) -> Result<Session, CoreError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| CoreError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("read {} bytes from {}", bytes.len(), path.display());
        self.open_bytes(bytes)
    }
}

impl Session {
    pub fn record(&self) -> &SaveRecord {
        &self.record
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn layout(&self) -> &FileLayout {
        &self.layout
    }
}
