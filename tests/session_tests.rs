//! End-to-end session tests: the public command/event contract a host sees.

use std::cell::RefCell;
use std::rc::Rc;

use gridfall::core::{EventKind, GameEvent, GameSession, SessionConfig};
use gridfall::types::{MoveOutcome, SessionStatus};

fn session_10x20(seed: u32) -> GameSession {
    GameSession::new(SessionConfig {
        columns: 10,
        rows: 20,
        seed,
        ..SessionConfig::default()
    })
}

#[test]
fn lifecycle_ready_playing_paused() {
    let mut session = session_10x20(1);
    assert_eq!(session.status(), SessionStatus::Pending);

    session.init();
    assert_eq!(session.status(), SessionStatus::Ready);

    session.start();
    assert_eq!(session.status(), SessionStatus::Playing);

    session.pause();
    assert_eq!(session.status(), SessionStatus::Paused);

    session.resume();
    assert_eq!(session.status(), SessionStatus::Playing);
}

#[test]
fn subscriptions_chain_and_fire_in_order() {
    let mut session = session_10x20(1);
    let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    let first = Rc::clone(&log);
    let second = Rc::clone(&log);
    session
        .on(EventKind::Ready, move |_| {
            first.borrow_mut().push("typed".into())
        })
        .on_named("ready", move |_| {
            second.borrow_mut().push("named".into())
        });

    session.init();
    assert_eq!(*log.borrow(), vec!["typed", "named"]);
}

#[test]
fn unknown_event_name_is_ignored_not_fatal() {
    let mut session = session_10x20(1);
    let hits = Rc::new(RefCell::new(0));
    {
        let hits = Rc::clone(&hits);
        session.on_named("definitelyNotAnEvent", move |_| *hits.borrow_mut() += 1);
    }

    // The bad subscription must not have landed anywhere.
    session.init();
    session.start();
    session.move_down();
    assert_eq!(*hits.borrow(), 0);
}

#[test]
fn available_events_lists_the_published_names() {
    let names = GameSession::available_events();
    assert_eq!(names.len(), 13);
    for expected in [
        "ready",
        "start",
        "pause",
        "resume",
        "moveDown",
        "moveHorizontally",
        "hardDrop",
        "rotate",
        "bottomReached",
        "newTetramino",
        "holdSwap",
        "scoreChange",
        "gameOver",
    ] {
        assert!(names.contains(&expected), "missing {}", expected);
    }
}

#[test]
fn blocked_horizontal_move_still_notifies() {
    let mut session = session_10x20(3);
    session.init();
    session.start();

    let positions: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));
    {
        let positions = Rc::clone(&positions);
        session.on(EventKind::MoveHorizontally, move |event| {
            if let GameEvent::MoveHorizontally(snapshot) = event {
                positions.borrow_mut().push(snapshot.x);
            }
        });
    }

    // Walk into the left wall and then push once more.
    for _ in 0..12 {
        session.move_horizontally(-1);
    }

    let recorded = positions.borrow();
    assert_eq!(recorded.len(), 12);
    // The final, blocked move reported the same x as the one before it.
    assert_eq!(recorded[recorded.len() - 1], recorded[recorded.len() - 2]);
}

#[test]
fn queue_always_holds_three_upcoming_pieces() {
    let mut session = session_10x20(7);
    session.init();
    session.start();
    assert_eq!(session.queue_preview().len(), 3);

    for _ in 0..5 {
        if session.status() != SessionStatus::Playing {
            break;
        }
        let front = session.queue_preview()[0].name();
        session.hard_drop();
        let outcome = session.move_down();
        assert_eq!(session.queue_preview().len(), 3);
        if matches!(outcome, Some(MoveOutcome::Locked { .. })) {
            assert_eq!(session.player().unwrap().tetramino.name(), front);
        }
    }
}

#[test]
fn same_seed_replays_the_same_piece_sequence() {
    let mut a = session_10x20(99);
    let mut b = session_10x20(99);
    a.init();
    b.init();

    assert_eq!(
        a.player().unwrap().tetramino.name(),
        b.player().unwrap().tetramino.name()
    );
    let names_a: Vec<_> = a.queue_preview().iter().map(|p| p.name()).collect();
    let names_b: Vec<_> = b.queue_preview().iter().map(|p| p.name()).collect();
    assert_eq!(names_a, names_b);
}

#[test]
fn gravity_respects_pause_and_interval() {
    let mut session = session_10x20(1);
    session.init();
    session.start();

    let interval = session.score().move_interval_ms();
    assert_eq!(interval, 1000);

    assert_eq!(session.tick(interval - 1), None);
    session.pause();
    // A paused session ignores any amount of elapsed time.
    assert_eq!(session.tick(interval * 10), None);
    session.resume();
    // The interval restarted from zero on resume.
    assert_eq!(session.tick(interval - 1), None);
    assert_eq!(session.tick(1), Some(MoveOutcome::Moved));
}

#[test]
fn a_session_played_to_the_end_reports_game_over_once() {
    let mut session = session_10x20(5);
    session.init();
    session.start();

    let game_overs = Rc::new(RefCell::new(0));
    {
        let game_overs = Rc::clone(&game_overs);
        session.on(EventKind::GameOver, move |_| {
            *game_overs.borrow_mut() += 1
        });
    }

    let mut saw_game_over = false;
    for _ in 0..10_000 {
        match session.move_down() {
            Some(MoveOutcome::GameOver) => {
                saw_game_over = true;
                break;
            }
            Some(_) => {}
            None => break,
        }
    }

    assert!(saw_game_over);
    assert_eq!(session.status(), SessionStatus::Over);
    assert_eq!(*game_overs.borrow(), 1);

    // Terminal until a full reset.
    assert_eq!(session.move_down(), None);
    session.restart();
    assert_eq!(session.status(), SessionStatus::Playing);
}

#[test]
fn restart_replays_from_a_clean_score() {
    let mut session = session_10x20(11);
    session.init();
    session.start();
    session.hard_drop();
    session.move_down();

    session.restart();
    assert_eq!(session.score().points(), 0);
    assert_eq!(session.score().lines(), 0);
    assert_eq!(session.score().level(), 1);
    assert!(session.hold_preview().is_none());
}

#[test]
fn hold_swap_emits_new_tetramino_then_hold_swap() {
    let mut session = session_10x20(13);
    session.init();
    session.start();

    let log: Rc<RefCell<Vec<EventKind>>> = Rc::new(RefCell::new(Vec::new()));
    for kind in [EventKind::NewTetramino, EventKind::HoldSwap] {
        let log = Rc::clone(&log);
        session.on(kind, move |event| log.borrow_mut().push(event.kind()));
    }

    let active = session.player().unwrap().tetramino.name();
    session.hold_swap();

    assert_eq!(
        *log.borrow(),
        vec![EventKind::NewTetramino, EventKind::HoldSwap]
    );
    assert_eq!(session.hold_preview().unwrap().name(), active);
}

#[test]
fn event_payloads_are_snapshots_with_stable_shape() {
    let mut session = session_10x20(17);
    let captured = Rc::new(RefCell::new(None));
    {
        let captured = Rc::clone(&captured);
        session.on(EventKind::ScoreChange, move |event| {
            *captured.borrow_mut() = Some(event.clone());
        });
    }
    session.init();

    let event = captured.borrow().clone().expect("scoreChange during init");
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["event"], "scoreChange");
    assert_eq!(json["rowsRemoved"], 0);
    assert_eq!(json["score"]["points"], 0);
    assert_eq!(json["score"]["lines"], 0);
    assert_eq!(json["score"]["level"], 1);
}
