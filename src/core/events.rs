//! Typed event bus decoupling the engine from presentation.
//!
//! Events are enum-keyed channels with an ordered listener list each.
//! Delivery is synchronous, in subscription order, and every payload is a
//! snapshot copy; listeners never see live engine state.
//!
//! Hosts that only have a string (config files, scripting) can subscribe by
//! name; unknown names are reported through a diagnostic and ignored rather
//! than failing the caller.

use serde::{Deserialize, Serialize};

use crate::core::scoring::Score;
use crate::types::PieceName;

/// Every event the engine can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Ready,
    Start,
    Pause,
    Resume,
    MoveDown,
    MoveHorizontally,
    HardDrop,
    Rotate,
    BottomReached,
    NewTetramino,
    HoldSwap,
    ScoreChange,
    GameOver,
}

impl EventKind {
    pub const ALL: [EventKind; 13] = [
        EventKind::Ready,
        EventKind::Start,
        EventKind::Pause,
        EventKind::Resume,
        EventKind::MoveDown,
        EventKind::MoveHorizontally,
        EventKind::HardDrop,
        EventKind::Rotate,
        EventKind::BottomReached,
        EventKind::NewTetramino,
        EventKind::HoldSwap,
        EventKind::ScoreChange,
        EventKind::GameOver,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Ready => "ready",
            EventKind::Start => "start",
            EventKind::Pause => "pause",
            EventKind::Resume => "resume",
            EventKind::MoveDown => "moveDown",
            EventKind::MoveHorizontally => "moveHorizontally",
            EventKind::HardDrop => "hardDrop",
            EventKind::Rotate => "rotate",
            EventKind::BottomReached => "bottomReached",
            EventKind::NewTetramino => "newTetramino",
            EventKind::HoldSwap => "holdSwap",
            EventKind::ScoreChange => "scoreChange",
            EventKind::GameOver => "gameOver",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Copy of the active piece state carried by movement events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub piece: PieceName,
    pub x: i32,
    pub y: i32,
    pub matrix: Vec<Vec<bool>>,
}

/// An emitted event with its payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "event")]
pub enum GameEvent {
    Ready,
    Start,
    Pause,
    Resume,
    MoveDown(PlayerSnapshot),
    MoveHorizontally(PlayerSnapshot),
    HardDrop(PlayerSnapshot),
    Rotate(PlayerSnapshot),
    BottomReached(PlayerSnapshot),
    NewTetramino(PlayerSnapshot),
    HoldSwap(PlayerSnapshot),
    #[serde(rename_all = "camelCase")]
    ScoreChange { score: Score, rows_removed: u32 },
    GameOver { score: Score },
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::Ready => EventKind::Ready,
            GameEvent::Start => EventKind::Start,
            GameEvent::Pause => EventKind::Pause,
            GameEvent::Resume => EventKind::Resume,
            GameEvent::MoveDown(_) => EventKind::MoveDown,
            GameEvent::MoveHorizontally(_) => EventKind::MoveHorizontally,
            GameEvent::HardDrop(_) => EventKind::HardDrop,
            GameEvent::Rotate(_) => EventKind::Rotate,
            GameEvent::BottomReached(_) => EventKind::BottomReached,
            GameEvent::NewTetramino(_) => EventKind::NewTetramino,
            GameEvent::HoldSwap(_) => EventKind::HoldSwap,
            GameEvent::ScoreChange { .. } => EventKind::ScoreChange,
            GameEvent::GameOver { .. } => EventKind::GameOver,
        }
    }
}

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Ordered listener lists, one per event kind.
pub struct EventBus {
    channels: Vec<Vec<Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            channels: (0..EventKind::ALL.len()).map(|_| Vec::new()).collect(),
        }
    }

    pub fn subscribe(&mut self, kind: EventKind, listener: Listener) {
        self.channels[kind as usize].push(listener);
    }

    /// Subscribe by event name. An unsupported name is reported and
    /// ignored; the listener is dropped.
    pub fn subscribe_named(&mut self, name: &str, listener: Listener) {
        match EventKind::from_name(name) {
            Some(kind) => self.subscribe(kind, listener),
            None => {
                let available: Vec<&str> = EventKind::ALL.iter().map(|k| k.name()).collect();
                tracing::error!(
                    event = name,
                    "unsupported event \"{}\"; events available: {}",
                    name,
                    available.join(", ")
                );
            }
        }
    }

    /// Deliver to every listener of the event's kind, in subscription
    /// order.
    pub fn emit(&mut self, event: &GameEvent) {
        for listener in &mut self.channels[event.kind() as usize] {
            listener(event);
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.channels[kind as usize].len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: Vec<(&str, usize)> = EventKind::ALL
            .iter()
            .map(|&k| (k.name(), self.listener_count(k)))
            .collect();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}
