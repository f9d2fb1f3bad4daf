use std::io::Cursor;

use crate::ability::Ability;
use crate::core_api::CoreError;
use crate::reader::LittleEndianReader;

// Save file constants
pub const MAGIC: u32 = u32::from_le_bytes(*b"CSAV");
pub const LEVEL_COUNT: usize = 128;

const U32_WIDTH: usize = 4;
pub const HEADER_LEN: usize = 3 * U32_WIDTH;
pub const LEVEL_TABLE_LEN: usize = LEVEL_COUNT * U32_WIDTH;
pub const SPEEDRUN_LEN: usize = U32_WIDTH;
pub const MIN_SAVE_LEN: usize = HEADER_LEN + LEVEL_TABLE_LEN + SPEEDRUN_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Reject files whose tag is not `CSAV` instead of passing it through.
    pub strict_magic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRecord {
    pub magic: u32,
    pub completed_levels: u32,
    pub unlocked_abilities: u32,
    pub completion_ticks: [u32; LEVEL_COUNT],
    pub speedrun_ticks: u32,
}

impl SaveRecord {
    pub fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        Self::decode_with(bytes, DecodeOptions::default())
    }

    pub fn decode_with(bytes: &[u8], options: DecodeOptions) -> Result<Self, CoreError> {
        if bytes.len() < MIN_SAVE_LEN {
            return Err(CoreError::Truncated {
                expected: MIN_SAVE_LEN,
                actual: bytes.len(),
            });
        }

        let mut r = LittleEndianReader::new(Cursor::new(&bytes[..MIN_SAVE_LEN]));
        let truncated = |_| CoreError::Truncated {
            expected: MIN_SAVE_LEN,
            actual: bytes.len(),
        };
        let magic = r.read_u32().map_err(truncated)?;
        let completed_levels = r.read_u32().map_err(truncated)?;
        let unlocked_abilities = r.read_u32().map_err(truncated)?;
        let completion_ticks = r.read_u32_array::<LEVEL_COUNT>().map_err(truncated)?;
        let speedrun_ticks = r.read_u32().map_err(truncated)?;

        let record = Self {
            magic,
            completed_levels,
            unlocked_abilities,
            completion_ticks,
            speedrun_ticks,
        };

        if !record.has_expected_magic() {
            if options.strict_magic {
                return Err(CoreError::MagicMismatch {
                    expected: MAGIC,
                    found: magic,
                });
            }
            log::warn!(
                "save tag is {:#010x}, not \"CSAV\" ({:#010x}); decoding anyway",
                magic,
                MAGIC
            );
        }

        let trailing = bytes.len() - r.position() as usize;
        if trailing > 0 {
            log::debug!("ignoring {trailing} trailing bytes after speedrun field");
        }

        Ok(record)
    }

    pub fn has_expected_magic(&self) -> bool {
        self.magic == MAGIC
    }

    /// The game lets the player enter a level once every level before it is done.
    pub fn is_level_unlocked(&self, index: usize) -> bool {
        index < LEVEL_COUNT && index as u64 <= u64::from(self.completed_levels)
    }

    /// 1-based number of the furthest level the player may enter.
    pub fn highest_unlocked_level(&self) -> usize {
        (self.completed_levels as usize).saturating_add(1).min(LEVEL_COUNT)
    }

    pub fn abilities(&self) -> Vec<Ability> {
        Ability::from_mask(self.unlocked_abilities)
    }

    pub fn has_ability(&self, ability: Ability) -> bool {
        let bit = ability.bit();
        bit < u32::BITS && self.unlocked_abilities & (1 << bit) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(record: &SaveRecord) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(MIN_SAVE_LEN);
        bytes.extend_from_slice(&record.magic.to_le_bytes());
        bytes.extend_from_slice(&record.completed_levels.to_le_bytes());
        bytes.extend_from_slice(&record.unlocked_abilities.to_le_bytes());
        for ticks in record.completion_ticks {
            bytes.extend_from_slice(&ticks.to_le_bytes());
        }
        bytes.extend_from_slice(&record.speedrun_ticks.to_le_bytes());
        bytes
    }

    fn sample() -> SaveRecord {
        let mut completion_ticks = [0u32; LEVEL_COUNT];
        completion_ticks[0] = 500;
        completion_ticks[127] = 42;
        SaveRecord {
            magic: MAGIC,
            completed_levels: 3,
            unlocked_abilities: 0b1010,
            completion_ticks,
            speedrun_ticks: 2000,
        }
    }

    #[test]
    fn minimum_length_is_528() {
        assert_eq!(MIN_SAVE_LEN, 528);
        assert_eq!(MAGIC.to_le_bytes(), *b"CSAV");
    }

    #[test]
    fn decodes_fields_at_fixed_offsets() {
        let bytes = encode(&sample());
        let record = SaveRecord::decode(&bytes).expect("sample should decode");
        assert_eq!(record, sample());
        assert_eq!(record.completion_ticks[127], 42);
    }

    #[test]
    fn short_buffer_is_truncated() {
        let bytes = encode(&sample());
        let err = SaveRecord::decode(&bytes[..MIN_SAVE_LEN - 1]).expect_err("527 bytes");
        assert!(matches!(
            err,
            CoreError::Truncated {
                expected: 528,
                actual: 527
            }
        ));
    }

    #[test]
    fn empty_buffer_is_truncated() {
        let err = SaveRecord::decode(&[]).expect_err("empty input");
        assert!(matches!(err, CoreError::Truncated { actual: 0, .. }));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut bytes = encode(&sample());
        bytes.extend_from_slice(&[0xFF; 32]);
        let record = SaveRecord::decode(&bytes).expect("longer file decodes");
        assert_eq!(record, sample());
    }

    #[test]
    fn foreign_magic_passes_through_by_default() {
        let mut record = sample();
        record.magic = 1;
        let decoded = SaveRecord::decode(&encode(&record)).expect("permissive decode");
        assert_eq!(decoded.magic, 1);
        assert!(!decoded.has_expected_magic());
    }

    #[test]
    fn strict_mode_rejects_foreign_magic() {
        let mut record = sample();
        record.magic = 1;
        let err = SaveRecord::decode_with(
            &encode(&record),
            DecodeOptions { strict_magic: true },
        )
        .expect_err("strict decode");
        assert!(matches!(
            err,
            CoreError::MagicMismatch {
                expected: MAGIC,
                found: 1
            }
        ));
    }

    #[test]
    fn completed_levels_gates_level_entry() {
        let record = sample();
        assert!(record.is_level_unlocked(0));
        assert!(record.is_level_unlocked(3));
        assert!(!record.is_level_unlocked(4));
        assert!(!record.is_level_unlocked(LEVEL_COUNT));
        assert_eq!(record.highest_unlocked_level(), 4);

        let mut maxed = sample();
        maxed.completed_levels = u32::MAX;
        assert_eq!(maxed.highest_unlocked_level(), LEVEL_COUNT);
    }

    #[test]
    fn ability_bits_follow_mask() {
        let record = sample();
        assert_eq!(record.abilities(), vec![Ability::DoubleJump, Ability::Dash]);
        assert!(record.has_ability(Ability::Dash));
        assert!(!record.has_ability(Ability::Glider));
        assert!(!record.has_ability(Ability::Unknown(40)));
    }
}
