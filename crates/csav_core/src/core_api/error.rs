use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    Io,
    Truncated,
    BadMagic,
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("cannot read {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("save data truncated: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("unexpected save tag {found:#010x}, expected {expected:#010x} (\"CSAV\")")]
    MagicMismatch { expected: u32, found: u32 },
}

impl CoreError {
    pub fn code(&self) -> CoreErrorCode {
        match self {
            Self::FileAccess { .. } => CoreErrorCode::Io,
            Self::Truncated { .. } => CoreErrorCode::Truncated,
            Self::MagicMismatch { .. } => CoreErrorCode::BadMagic,
        }
    }
}
