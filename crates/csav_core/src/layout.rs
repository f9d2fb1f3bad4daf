use std::fmt;

use crate::core_api::CoreError;
use crate::save::{HEADER_LEN, LEVEL_TABLE_LEN, MIN_SAVE_LEN, SPEEDRUN_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionId {
    Header,
    CompletionTicks,
    SpeedrunTicks,
    Trailing,
}

impl SectionId {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Header => "header",
            Self::CompletionTicks => "completion_ticks",
            Self::SpeedrunTicks => "speedrun_ticks",
            Self::Trailing => "trailing",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLayout {
    pub id: SectionId,
    pub range: ByteRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLayout {
    pub file_len: usize,
    pub sections: Vec<SectionLayout>,
}

impl FileLayout {
    /// Lays the fixed sections over a file of `file_len` bytes. Anything past
    /// the speedrun field becomes a `Trailing` section.
    pub fn for_len(file_len: usize) -> Result<Self, CoreError> {
        if file_len < MIN_SAVE_LEN {
            return Err(CoreError::Truncated {
                expected: MIN_SAVE_LEN,
                actual: file_len,
            });
        }

        let mut sections = Vec::with_capacity(4);
        let mut cursor = 0usize;
        for (id, len) in [
            (SectionId::Header, HEADER_LEN),
            (SectionId::CompletionTicks, LEVEL_TABLE_LEN),
            (SectionId::SpeedrunTicks, SPEEDRUN_LEN),
        ] {
            sections.push(SectionLayout {
                id,
                range: ByteRange {
                    start: cursor,
                    end: cursor + len,
                },
            });
            cursor += len;
        }
        if file_len > cursor {
            sections.push(SectionLayout {
                id: SectionId::Trailing,
                range: ByteRange {
                    start: cursor,
                    end: file_len,
                },
            });
        }

        Ok(Self { file_len, sections })
    }

    pub fn section(&self, id: SectionId) -> Option<&SectionLayout> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn trailing_len(&self) -> usize {
        self.section(SectionId::Trailing)
            .map(|s| s.range.len())
            .unwrap_or(0)
    }
}
