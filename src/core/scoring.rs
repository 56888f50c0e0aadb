//! Scoring and leveling.
//!
//! Points per clear follow the house rule: up to four rows earn 20 points a
//! row, larger clears drop to 10 a row. The asymmetry is deliberate and kept
//! as-is. Level is recomputed from total points (one level per 1000, never
//! below 1), and the gravity interval is derived from the level.

use serde::{Deserialize, Serialize};

use crate::types::{
    BASE_MOVE_INTERVAL_MS, BULK_CLEAR_THRESHOLD, BULK_LINE_POINTS, LEVEL_POINTS, LEVEL_SPEEDUP_MS,
    LINE_POINTS, MIN_MOVE_INTERVAL_MS,
};

/// Session score. Monotonically non-decreasing until a full re-init.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    points: u32,
    lines: u32,
    level: u32,
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            lines: 0,
            level: 1,
        }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Account for a lock that cleared `rows_removed` rows (possibly zero).
    pub fn apply_clear(&mut self, rows_removed: u32) {
        self.lines += rows_removed;
        self.points += if rows_removed > BULK_CLEAR_THRESHOLD {
            rows_removed * BULK_LINE_POINTS
        } else {
            rows_removed * LINE_POINTS
        };
        self.level = if self.points >= LEVEL_POINTS {
            self.points / LEVEL_POINTS
        } else {
            1
        };
    }

    /// Gravity interval for the current level, floored at 100ms.
    pub fn move_interval_ms(&self) -> u64 {
        BASE_MOVE_INTERVAL_MS
            .saturating_sub(self.level as u64 * LEVEL_SPEEDUP_MS)
            .max(MIN_MOVE_INTERVAL_MS)
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}
