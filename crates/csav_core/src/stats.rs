use serde::Serialize;

use crate::save::SaveRecord;

pub const SECONDS_PER_TICK: f64 = 0.01;
const TICKS_PER_MINUTE: u64 = 6_000;
const TICKS_PER_SECOND: u64 = 100;

pub fn ticks_to_seconds(ticks: u32) -> f64 {
    f64::from(ticks) * SECONDS_PER_TICK
}

/// Renders ticks the way the in-game timer does: `MM:SS.cc`.
pub fn format_clock(ticks: u32) -> String {
    let ticks = u64::from(ticks);
    let minutes = ticks / TICKS_PER_MINUTE;
    let rest = ticks % TICKS_PER_MINUTE;
    format!(
        "{:02}:{:02}.{:02}",
        minutes,
        rest / TICKS_PER_SECOND,
        rest % TICKS_PER_SECOND
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelTime {
    pub index: usize,
    pub ticks: u32,
    pub seconds: f64,
}

impl LevelTime {
    /// Level number as shown to the player.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub speedrun_seconds: f64,
    pub levels: Vec<LevelTime>,
    pub shortest: Option<LevelTime>,
    pub longest: Option<LevelTime>,
}

impl Statistics {
    pub fn compute(record: &SaveRecord) -> Self {
        let mut levels = Vec::new();
        let mut shortest: Option<LevelTime> = None;
        let mut longest: Option<LevelTime> = None;

        for (index, &ticks) in record.completion_ticks.iter().enumerate() {
            if ticks == 0 {
                continue;
            }
            let level = LevelTime {
                index,
                ticks,
                seconds: ticks_to_seconds(ticks),
            };
            // Strict comparisons: on a tie the lower index stays.
            if shortest.is_none_or(|s| level.seconds < s.seconds) {
                shortest = Some(level);
            }
            if longest.is_none_or(|l| level.seconds > l.seconds) {
                longest = Some(level);
            }
            levels.push(level);
        }

        log::debug!(
            "{} of {} level slots hold a completion time",
            levels.len(),
            record.completion_ticks.len()
        );

        Self {
            speedrun_seconds: ticks_to_seconds(record.speedrun_ticks),
            levels,
            shortest,
            longest,
        }
    }

    pub fn level(&self, index: usize) -> Option<&LevelTime> {
        self.levels
            .binary_search_by_key(&index, |l| l.index)
            .ok()
            .map(|pos| &self.levels[pos])
    }

    pub fn completed_slot_count(&self) -> usize {
        self.levels.len()
    }

    pub fn has_completed_levels(&self) -> bool {
        !self.levels.is_empty()
    }
}
