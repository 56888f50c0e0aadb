//! Session state machine: piece lifecycle, queue and hold, gravity, and the
//! command surface hosts drive.
//!
//! One `GameSession` owns every piece of mutable game state. Hosts interact
//! through commands, preview queries and the event bus; the engine hands out
//! snapshot copies and never aliases its internals. All calls run to
//! completion on the caller's thread, so the host's serialized input
//! dispatch is the concurrency model.

use std::collections::VecDeque;

use crate::core::catalog::{self, SimpleRng};
use crate::core::events::{EventBus, EventKind, GameEvent, PlayerSnapshot};
use crate::core::grid::Grid;
use crate::core::piece::Tetramino;
use crate::core::scoring::Score;
use crate::types::{
    MoveOutcome, SessionStatus, DEFAULT_COLUMNS, DEFAULT_QUEUE_SIZE, DEFAULT_ROWS, DEFAULT_SEED,
};

/// Session construction parameters.
///
/// Validation is permissive: a zero field is reported through a diagnostic
/// and replaced by its default, and construction proceeds in that degraded
/// configuration rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub columns: usize,
    pub rows: usize,
    pub queue_size: usize,
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            queue_size: DEFAULT_QUEUE_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

impl SessionConfig {
    fn validated(mut self) -> Self {
        if self.columns == 0 {
            tracing::error!("session config: columns is not set; using default");
            self.columns = DEFAULT_COLUMNS;
        }
        if self.rows == 0 {
            tracing::error!("session config: rows is not set; using default");
            self.rows = DEFAULT_ROWS;
        }
        if self.queue_size == 0 {
            tracing::error!("session config: queue size is not set; using default");
            self.queue_size = DEFAULT_QUEUE_SIZE;
        }
        self
    }
}

/// The active falling piece: its top-left offset into the grid and its
/// matrix. Replaced wholesale on every spawn.
#[derive(Debug, Clone)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub tetramino: Tetramino,
}

impl Player {
    fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            piece: self.tetramino.name(),
            x: self.x,
            y: self.y,
            matrix: self
                .tetramino
                .matrix()
                .iter()
                .map(|row| row.to_vec())
                .collect(),
        }
    }
}

/// The rules engine instance.
#[derive(Debug)]
pub struct GameSession {
    config: SessionConfig,
    grid: Grid,
    queue: VecDeque<Tetramino>,
    hold: Option<Tetramino>,
    score: Score,
    player: Option<Player>,
    status: SessionStatus,
    rng: SimpleRng,
    events: EventBus,
    /// Milliseconds accumulated toward the next gravity step. Cleared on
    /// start/pause/resume so a pause cancels the pending tick outright.
    move_timer_ms: u64,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        let config = config.validated();
        Self {
            grid: Grid::new(config.columns, config.rows),
            queue: VecDeque::with_capacity(config.queue_size),
            hold: None,
            score: Score::new(),
            player: None,
            status: SessionStatus::Pending,
            rng: SimpleRng::new(config.seed),
            events: EventBus::new(),
            move_timer_ms: 0,
            config,
        }
    }

    // ---- subscriptions ------------------------------------------------

    /// Subscribe a listener to one event kind. Chainable.
    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(&GameEvent) + 'static) -> &mut Self {
        self.events.subscribe(kind, Box::new(listener));
        self
    }

    /// Subscribe by event name; unsupported names are reported and ignored.
    pub fn on_named(&mut self, name: &str, listener: impl FnMut(&GameEvent) + 'static) -> &mut Self {
        self.events.subscribe_named(name, Box::new(listener));
        self
    }

    pub fn available_events() -> [&'static str; 13] {
        let mut names = [""; 13];
        for (slot, kind) in names.iter_mut().zip(EventKind::ALL) {
            *slot = kind.name();
        }
        names
    }

    // ---- queries ------------------------------------------------------

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Upcoming pieces, front first, trimmed to their preview shape.
    pub fn queue_preview(&self) -> Vec<Tetramino> {
        self.queue.iter().map(Tetramino::trimmed).collect()
    }

    /// Held piece trimmed to its preview shape, if any.
    pub fn hold_preview(&self) -> Option<Tetramino> {
        self.hold.as_ref().map(Tetramino::trimmed)
    }

    // ---- lifecycle commands -------------------------------------------

    /// (Re)build grid, queue, hold, score and player from scratch.
    /// Ends in `Ready`. Emits `scoreChange`, `newTetramino`, then `ready`.
    pub fn init(&mut self) {
        self.grid = Grid::new(self.config.columns, self.config.rows);

        self.score = Score::new();
        self.emit(GameEvent::ScoreChange {
            score: self.score,
            rows_removed: 0,
        });

        self.queue.clear();
        for _ in 0..self.config.queue_size {
            let piece = catalog::random_piece(&mut self.rng);
            self.queue.push_back(piece);
        }
        self.hold = None;

        self.player_reset(None);

        self.status = SessionStatus::Ready;
        tracing::debug!(status = self.status.as_str(), "session initialized");
        self.emit(GameEvent::Ready);
    }

    /// Begin play from `Ready`: the player piece is projected onto the grid
    /// and the first gravity step is due one full move interval from now.
    pub fn start(&mut self) {
        if self.status != SessionStatus::Ready {
            return;
        }
        self.status = SessionStatus::Playing;
        if let Some(p) = &self.player {
            self.grid.draw(&p.tetramino, p.x, p.y);
        }
        self.move_timer_ms = 0;
        tracing::debug!("session started");
        self.emit(GameEvent::Start);
    }

    /// Full reset and immediate start.
    pub fn restart(&mut self) {
        self.init();
        self.start();
    }

    /// Suspend play. Clearing the gravity accumulator cancels the pending
    /// tick, so no gravity step can land while paused.
    pub fn pause(&mut self) {
        if self.status != SessionStatus::Playing {
            return;
        }
        self.status = SessionStatus::Paused;
        self.move_timer_ms = 0;
        tracing::debug!("session paused");
        self.emit(GameEvent::Pause);
    }

    pub fn resume(&mut self) {
        if self.status != SessionStatus::Paused {
            return;
        }
        self.status = SessionStatus::Playing;
        self.move_timer_ms = 0;
        tracing::debug!("session resumed");
        self.emit(GameEvent::Resume);
    }

    // ---- gravity ------------------------------------------------------

    /// Advance the gravity clock by `elapsed_ms`. Once a full move interval
    /// has accumulated, performs one downward step and reports its outcome.
    /// Inert outside `Playing`.
    pub fn tick(&mut self, elapsed_ms: u64) -> Option<MoveOutcome> {
        if self.status != SessionStatus::Playing {
            return None;
        }

        self.move_timer_ms += elapsed_ms;
        if self.move_timer_ms < self.score.move_interval_ms() {
            return None;
        }

        let outcome = self.move_down();
        if outcome.is_some() {
            self.move_timer_ms = 0;
        }
        outcome
    }

    // ---- gameplay commands --------------------------------------------

    /// One downward step. On collision the piece locks: full rows are
    /// cleared, the score updates, the next piece spawns, and a spawn
    /// collision ends the session. `None` outside `Playing`.
    pub fn move_down(&mut self) -> Option<MoveOutcome> {
        if self.status != SessionStatus::Playing {
            return None;
        }
        let p = self.player.as_mut()?;

        self.grid.undraw(&p.tetramino, p.x, p.y);
        p.y += 1;

        if self.grid.collides(&p.tetramino, p.x, p.y) {
            p.y -= 1;
            self.grid.draw(&p.tetramino, p.x, p.y);
            return Some(self.bottom_reached());
        }

        self.grid.draw(&p.tetramino, p.x, p.y);
        let snapshot = p.snapshot();
        self.emit(GameEvent::MoveDown(snapshot));
        Some(MoveOutcome::Moved)
    }

    /// Shift the piece by `dx` columns, reverting on collision. Emits
    /// `moveHorizontally` either way; subscribers see the (possibly
    /// unchanged) position. No-op outside `Playing`.
    pub fn move_horizontally(&mut self, dx: i32) {
        if self.status != SessionStatus::Playing {
            return;
        }
        let Some(p) = self.player.as_mut() else {
            return;
        };

        self.grid.undraw(&p.tetramino, p.x, p.y);
        p.x += dx;
        if self.grid.collides(&p.tetramino, p.x, p.y) {
            p.x -= dx;
        }
        self.grid.draw(&p.tetramino, p.x, p.y);

        let snapshot = p.snapshot();
        self.emit(GameEvent::MoveHorizontally(snapshot));
    }

    /// Rotate with wall-kick recovery. The kick search walks offsets of
    /// alternating sign and growing magnitude (+1, -2, +3, ...) applied
    /// cumulatively to `x`; if the next offset would exceed the matrix side
    /// the rotation is undone and `x` restored, leaving the piece exactly
    /// where it was. No-op outside `Playing`.
    pub fn player_rotate(&mut self, direction: i32) {
        if self.status != SessionStatus::Playing {
            return;
        }
        let Some(p) = self.player.as_mut() else {
            return;
        };

        let initial_x = p.x;
        let mut offset: i32 = 1;

        self.grid.undraw(&p.tetramino, p.x, p.y);
        p.tetramino.rotate(direction);

        while self.grid.collides(&p.tetramino, p.x, p.y) {
            p.x += offset;
            offset = -(offset + if offset > 0 { 1 } else { -1 });

            if offset > p.tetramino.side() as i32 {
                p.tetramino.rotate(-direction);
                p.x = initial_x;
                break;
            }
        }

        self.grid.draw(&p.tetramino, p.x, p.y);
        let snapshot = p.snapshot();
        self.emit(GameEvent::Rotate(snapshot));
    }

    /// Drop the piece straight down to its resting position. Locking is
    /// left to the next downward step. Safe in any status (a missing player
    /// makes it a no-op).
    pub fn hard_drop(&mut self) {
        let Some(p) = self.player.as_mut() else {
            return;
        };

        self.grid.undraw(&p.tetramino, p.x, p.y);
        loop {
            p.y += 1;
            if self.grid.collides(&p.tetramino, p.x, p.y) {
                break;
            }
        }
        p.y -= 1;
        self.grid.draw(&p.tetramino, p.x, p.y);

        let snapshot = p.snapshot();
        self.emit(GameEvent::HardDrop(snapshot));
    }

    /// Exchange the active piece with the hold slot (or with a fresh random
    /// piece when the slot is empty). The slot stores an unrotated template
    /// copy of the active shape. Emits `newTetramino` for the spawned
    /// replacement, then `holdSwap`.
    pub fn hold_swap(&mut self) {
        let Some(p) = self.player.as_mut() else {
            return;
        };

        self.grid.undraw(&p.tetramino, p.x, p.y);
        let active_name = p.tetramino.name();

        let retrieved = match self.hold.take() {
            Some(held) => held,
            None => catalog::random_piece(&mut self.rng),
        };
        self.hold = Some(Tetramino::new(active_name));

        self.player_reset(Some(retrieved));

        let snapshot = self.player.as_ref().map(Player::snapshot);
        if let Some(snapshot) = snapshot {
            self.emit(GameEvent::HoldSwap(snapshot));
        }
    }

    // ---- internals ----------------------------------------------------

    /// Lock sequence: clear rows, score, notify, respawn; a spawn collision
    /// is terminal.
    fn bottom_reached(&mut self) -> MoveOutcome {
        let rows_removed = self.grid.remove_full_rows();
        self.score.apply_clear(rows_removed);
        self.emit(GameEvent::ScoreChange {
            score: self.score,
            rows_removed,
        });

        let snapshot = self.player.as_ref().map(Player::snapshot);
        if let Some(snapshot) = snapshot {
            self.emit(GameEvent::BottomReached(snapshot));
        }

        self.player_reset(None);

        let collided_at_spawn = self
            .player
            .as_ref()
            .is_some_and(|p| self.grid.collides(&p.tetramino, p.x, p.y));

        if collided_at_spawn {
            if let Some(p) = &self.player {
                self.grid.draw(&p.tetramino, p.x, p.y);
            }
            self.game_over();
            return MoveOutcome::GameOver;
        }

        MoveOutcome::Locked { rows_removed }
    }

    fn game_over(&mut self) {
        self.status = SessionStatus::Over;
        self.move_timer_ms = 0;
        tracing::debug!(points = self.score.points(), "game over");
        self.emit(GameEvent::GameOver { score: self.score });
    }

    /// Install the next active piece: an explicit hand-off, or the queue
    /// front (the queue is refilled with one fresh random piece). The piece
    /// spawns horizontally centered at the top.
    fn player_reset(&mut self, handoff: Option<Tetramino>) {
        let tetramino = match handoff {
            Some(piece) => piece,
            None => self.next_tetramino(),
        };

        let x = (self.config.columns / 2) as i32 - (tetramino.side() / 2) as i32 - 1;
        let player = Player { x, y: 0, tetramino };
        let snapshot = player.snapshot();
        self.player = Some(player);

        self.emit(GameEvent::NewTetramino(snapshot));
    }

    fn next_tetramino(&mut self) -> Tetramino {
        let next = self
            .queue
            .pop_front()
            .unwrap_or_else(|| catalog::random_piece(&mut self.rng));
        self.queue.push_back(catalog::random_piece(&mut self.rng));
        next
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.emit(&event);
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}
