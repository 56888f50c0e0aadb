//! Core types shared across the engine and its hosts.
//! Pure data, no I/O.

use serde::{Deserialize, Serialize};

/// Default playfield dimensions, used when construction is given none
/// (or invalid ones).
pub const DEFAULT_COLUMNS: usize = 12;
pub const DEFAULT_ROWS: usize = 20;

/// Upcoming-piece queue length.
pub const DEFAULT_QUEUE_SIZE: usize = 3;

/// Default RNG seed for reproducible sessions.
pub const DEFAULT_SEED: u32 = 1;

/// Piece matrices are square with side 2-4; 4 bounds every allocation.
pub const MAX_PIECE_SIDE: usize = 4;

/// Gravity timing: the interval is `BASE - level * STEP`, floored at `MIN`.
pub const BASE_MOVE_INTERVAL_MS: u64 = 1100;
pub const LEVEL_SPEEDUP_MS: u64 = 100;
pub const MIN_MOVE_INTERVAL_MS: u64 = 100;

/// Scoring: clears of up to `BULK_CLEAR_THRESHOLD` rows earn `LINE_POINTS`
/// per row, larger clears earn `BULK_LINE_POINTS` per row. One level per
/// `LEVEL_POINTS` points, starting at level 1.
pub const LINE_POINTS: u32 = 20;
pub const BULK_LINE_POINTS: u32 = 10;
pub const BULK_CLEAR_THRESHOLD: u32 = 4;
pub const LEVEL_POINTS: u32 = 1000;

/// The seven canonical piece shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceName {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceName {
    pub const ALL: [PieceName; 7] = [
        PieceName::I,
        PieceName::J,
        PieceName::L,
        PieceName::O,
        PieceName::S,
        PieceName::T,
        PieceName::Z,
    ];

    /// Parse a piece name (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceName::I),
            "j" => Some(PieceName::J),
            "l" => Some(PieceName::L),
            "o" => Some(PieceName::O),
            "s" => Some(PieceName::S),
            "t" => Some(PieceName::T),
            "z" => Some(PieceName::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceName::I => "i",
            PieceName::J => "j",
            PieceName::L => "l",
            PieceName::O => "o",
            PieceName::S => "s",
            PieceName::T => "t",
            PieceName::Z => "z",
        }
    }
}

/// Session lifecycle phase. Exactly one per session.
///
/// `Pending -> Ready -> Playing <-> Paused`, `Playing -> Over`.
/// `Over` and `Pending` only leave through a full `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Ready,
    Playing,
    Paused,
    Over,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Ready => "ready",
            SessionStatus::Playing => "playing",
            SessionStatus::Paused => "paused",
            SessionStatus::Over => "over",
        }
    }
}

/// Result of a single downward step.
///
/// `Locked` reports how many rows the lock cleared (possibly zero);
/// `GameOver` means the replacement piece collided at spawn and the
/// session is now terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum MoveOutcome {
    Moved,
    #[serde(rename_all = "camelCase")]
    Locked { rows_removed: u32 },
    GameOver,
}
