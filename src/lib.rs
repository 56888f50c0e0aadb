//! gridfall: the rules engine of a falling-block puzzle game.
//!
//! The engine tracks a grid of cells, a sequence of falling pieces, a hold
//! slot, scoring, and the state machine over ready/playing/paused/over. It
//! owns no rendering and no input: hosts drive it through commands, read
//! preview queries, and subscribe to its events. `term` is the bundled
//! terminal host's painter and lives outside the engine proper.

pub mod core;
pub mod term;
pub mod types;

pub use crate::core::{GameSession, SessionConfig};
pub use crate::types::{MoveOutcome, PieceName, SessionStatus};
