//! Core module - the rules engine, free of UI, networking and I/O.

pub mod catalog;
pub mod events;
pub mod grid;
pub mod piece;
pub mod scoring;
pub mod session;

pub use catalog::{random_piece, SimpleRng};
pub use events::{EventBus, EventKind, GameEvent, PlayerSnapshot};
pub use grid::{Cell, Grid};
pub use piece::Tetramino;
pub use scoring::Score;
pub use session::{GameSession, Player, SessionConfig};
