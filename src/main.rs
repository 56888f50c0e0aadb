//! Terminal host for the gridfall engine.
//!
//! All game rules live in `gridfall::core`; this binary only wires keys to
//! engine commands, drives the gravity clock, and paints frames from the
//! engine's queries and events.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tracing_subscriber::EnvFilter;

use gridfall::core::{EventKind, GameEvent, GameSession, Score, SessionConfig};
use gridfall::term::Screen;
use gridfall::types::SessionStatus;

const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut screen = Screen::new();
    screen.enter()?;

    let result = run(&mut screen);

    // Always try to restore the terminal.
    let _ = screen.exit();
    result
}

fn run(screen: &mut Screen) -> Result<()> {
    let mut session = GameSession::new(SessionConfig {
        columns: 10,
        rows: 20,
        ..SessionConfig::default()
    });

    // The score panel is fed by events, not by polling the engine: the
    // same contract a remote or recorded host would rely on.
    let hud_score = Rc::new(RefCell::new(Score::new()));
    {
        let hud = Rc::clone(&hud_score);
        session.on(EventKind::ScoreChange, move |event| {
            if let GameEvent::ScoreChange { score, .. } = event {
                *hud.borrow_mut() = *score;
            }
        });
    }

    session.init();

    let mut last_frame = Instant::now();
    loop {
        screen.draw(&session, *hud_score.borrow())?;

        let timeout = Duration::from_millis(FRAME_MS)
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let ctrl_c = key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL);
                    if ctrl_c || key.code == KeyCode::Char('q') {
                        return Ok(());
                    }
                    handle_key(&mut session, key.code);
                }
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= Duration::from_millis(FRAME_MS) {
            last_frame = Instant::now();
            session.tick(elapsed.as_millis() as u64);
        }
    }
}

fn handle_key(session: &mut GameSession, code: KeyCode) {
    match code {
        KeyCode::Down => {
            session.move_down();
        }
        KeyCode::Left => session.move_horizontally(-1),
        KeyCode::Right => session.move_horizontally(1),
        KeyCode::Char(',') => session.player_rotate(-1),
        KeyCode::Char('.') => session.player_rotate(1),
        KeyCode::Char(' ') => session.hard_drop(),
        KeyCode::Esc => session.pause(),
        KeyCode::Char('r') => session.restart(),
        KeyCode::Enter => match session.status() {
            SessionStatus::Playing => session.hold_swap(),
            SessionStatus::Paused => session.resume(),
            SessionStatus::Ready => session.start(),
            _ => {}
        },
        _ => {}
    }
}
