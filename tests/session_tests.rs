//! Session tests - full play-throughs, combo timing, clock and liveness

use tui_pairs::core::{
    find_connectable_pair, is_deadlocked, Board, LevelCatalog, LevelConfig, Session, SessionEvent,
    SimpleRng,
};
use tui_pairs::types::{
    Intent, Phase, Position, ShuffleKind, FINISH_GRACE_MS, MATCH_RESOLVE_MS,
};

fn level(id: u32, time: u32) -> LevelConfig {
    LevelConfig {
        id,
        interior_rows: 1,
        interior_cols: 8,
        tile_type_count: 4,
        time_limit_seconds: time,
        label: "Strip".to_string(),
        description: String::new(),
    }
}

/// One row of four adjacent pairs: `1 1 2 2 3 3 4 4`
fn strip() -> Board {
    Board::from_rows(&[
        vec![0; 10],
        vec![0, 1, 1, 2, 2, 3, 3, 4, 4, 0],
        vec![0; 10],
    ])
    .unwrap()
}

fn started(board: Board, level: LevelConfig) -> Session {
    let mut s = Session::with_board(level, board, SimpleRng::new(11));
    s.start();
    s.drain_events();
    s
}

fn match_pair(s: &mut Session, a: (usize, usize), b: (usize, usize)) -> Vec<SessionEvent> {
    assert!(s.apply_intent(Intent::Select(a.into())));
    assert!(s.apply_intent(Intent::Select(b.into())));
    s.drain_events()
}

fn combo_of(events: &[SessionEvent]) -> Option<u32> {
    events.iter().find_map(|e| match e {
        SessionEvent::MatchSucceeded { combo, .. } => Some(*combo),
        _ => None,
    })
}

#[test]
fn test_combo_builds_within_window_and_resets_after_gap() {
    let mut s = started(strip(), level(1, 60));

    match_pair(&mut s, (1, 1), (1, 2));
    assert_eq!(s.combo(), 1);
    s.tick(1000);

    let events = match_pair(&mut s, (1, 3), (1, 4));
    assert_eq!(combo_of(&events), Some(1));
    assert_eq!(s.combo(), 2);
    s.tick(1000);

    match_pair(&mut s, (1, 5), (1, 6));
    assert_eq!(s.combo(), 3);

    // Three seconds of inactivity outlasts the 2.5s window.
    s.tick(3000);
    assert_eq!(s.combo(), 0);

    let events = match_pair(&mut s, (1, 7), (1, 8));
    assert_eq!(combo_of(&events), Some(0));
    assert_eq!(s.combo(), 1);

    s.tick(MATCH_RESOLVE_MS);
    // 14 + 19 + 24 + 14
    assert_eq!(s.score(), 71);
}

#[test]
fn test_failed_pick_breaks_combo() {
    let mut s = started(strip(), level(1, 60));
    match_pair(&mut s, (1, 1), (1, 2));
    s.tick(MATCH_RESOLVE_MS);
    assert_eq!(s.combo(), 1);

    let events = match_pair(&mut s, (1, 3), (1, 5));
    assert!(events.iter().any(|e| matches!(e, SessionEvent::MatchFailed { .. })));
    assert_eq!(s.combo(), 0);
    assert_eq!(s.selection(), Some(Position::new(1, 5)));
}

#[test]
fn test_clock_runs_out_with_tiles_left() {
    let mut s = started(strip(), level(1, 3));
    s.tick(2999);
    assert_eq!(s.phase(), Phase::Playing);
    s.tick(1);
    assert_eq!(s.phase(), Phase::Lost);
    assert_eq!(s.time_left_secs(), 0);
    assert!(s.tiles_left() > 0);
    assert!(s
        .drain_events()
        .contains(&SessionEvent::Lost { score: 0 }));

    // Terminal: nothing moves any more.
    assert!(!s.apply_intent(Intent::Select(Position::new(1, 1))));
    assert!(!s.tick(10_000));
}

#[test]
fn test_cleared_board_wins_regardless_of_time() {
    let mut s = started(strip(), level(1, 1));
    for (a, b) in [((1, 1), (1, 2)), ((1, 3), (1, 4)), ((1, 5), (1, 6))] {
        match_pair(&mut s, a, b);
    }
    // The last pick flushes the previous match; resolve the final one.
    match_pair(&mut s, (1, 7), (1, 8));
    s.tick(MATCH_RESOLVE_MS);
    assert_eq!(s.tiles_left(), 0);

    // One second has not elapsed on the clock yet, and it is now stopped.
    s.tick(FINISH_GRACE_MS);
    assert_eq!(s.phase(), Phase::Won);
    assert_eq!(s.completed_level(), Some(1));
    assert!(s.time_left_secs() > 0);
}

#[test]
fn test_match_cancelled_by_loss_leaves_board() {
    let mut s = started(strip(), level(1, 1));
    s.tick(900);
    match_pair(&mut s, (1, 1), (1, 2));
    // The clock runs out before the removal delay.
    s.tick(100);
    assert_eq!(s.phase(), Phase::Lost);
    assert!(s.board().is_occupied(Position::new(1, 1)));
    assert_eq!(s.score(), 0);
}

#[test]
fn test_penalties_floor_at_zero() {
    let mut s = started(strip(), level(1, 60));
    assert!(s.apply_intent(Intent::Hint));
    assert_eq!(s.score(), 0);
    assert!(s.apply_intent(Intent::Shuffle));
    assert_eq!(s.score(), 0);

    match_pair(&mut s, (1, 1), (1, 1)); // select + deselect
    let pair = find_connectable_pair(s.board()).unwrap();
    assert!(s.apply_intent(Intent::Select(pair.0)));
    assert!(s.apply_intent(Intent::Select(pair.1)));
    s.tick(MATCH_RESOLVE_MS);
    let earned = s.score();
    assert!(earned >= 14);

    s.apply_intent(Intent::Hint);
    assert_eq!(s.score(), earned.saturating_sub(20));
}

#[test]
fn test_credits_run_out() {
    let mut s = started(strip(), level(1, 60));
    for _ in 0..3 {
        assert!(s.apply_intent(Intent::Shuffle));
    }
    assert!(!s.apply_intent(Intent::Shuffle));
    assert_eq!(s.shuffles_left(), 0);
    let manual = s
        .drain_events()
        .iter()
        .filter(|e| {
            **e == SessionEvent::BoardReplaced {
                kind: ShuffleKind::Manual,
            }
        })
        .count();
    assert_eq!(manual, 3);
}

#[test]
fn test_deadlocked_start_is_silently_reshuffled() {
    let board = Board::from_rows(&[
        vec![0, 0, 0, 0],
        vec![0, 1, 2, 0],
        vec![0, 2, 1, 0],
        vec![0, 0, 0, 0],
    ])
    .unwrap();
    let config = LevelConfig {
        interior_rows: 2,
        interior_cols: 2,
        ..level(1, 60)
    };
    let mut s = Session::with_board(config, board, SimpleRng::new(3));
    s.start();
    assert!(!is_deadlocked(s.board()));
    assert_eq!(s.shuffles_left(), 3);
    assert!(s.drain_events().contains(&SessionEvent::BoardReplaced {
        kind: ShuffleKind::Silent
    }));
}

#[test]
fn test_unmatchable_tile_does_not_hang() {
    let mut board = Board::new(3, 3);
    board.set(Position::new(1, 1), 1);
    let config = LevelConfig {
        interior_rows: 1,
        interior_cols: 1,
        ..level(1, 60)
    };
    let mut s = Session::with_board(config, board, SimpleRng::new(1));
    s.start();
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.tiles_left(), 1);
}

/// Play whole levels by always taking the first connectable pair. After
/// every removal the board must still offer a move until it is empty.
#[test]
fn test_liveness_through_full_games() {
    let catalog = LevelCatalog::builtin();
    for id in [1, 3] {
        for seed in 1..=3u32 {
            let config = catalog.get(id).unwrap().clone();
            let mut s = Session::new(config, SimpleRng::new(seed));
            s.start();

            while s.tiles_left() > 0 {
                assert!(
                    !is_deadlocked(s.board()),
                    "level {} seed {} stuck with {} tiles",
                    id,
                    seed,
                    s.tiles_left()
                );
                let (a, b) = find_connectable_pair(s.board()).unwrap();
                assert!(s.apply_intent(Intent::Select(a)));
                assert!(s.apply_intent(Intent::Select(b)));
                s.tick(MATCH_RESOLVE_MS);
                assert_eq!(s.phase(), Phase::Playing);
            }

            s.tick(FINISH_GRACE_MS);
            assert_eq!(s.phase(), Phase::Won, "level {} seed {}", id, seed);
            assert!(s.score() > 0);
        }
    }
}

/// A single adjacent pair: the next match clears the board
fn last_pair(time: u32) -> Session {
    let board = Board::from_rows(&[vec![0; 4], vec![0, 1, 1, 0], vec![0; 4]]).unwrap();
    let config = LevelConfig {
        interior_rows: 1,
        interior_cols: 2,
        ..level(1, time)
    };
    started(board, config)
}

#[test]
fn test_clock_expiring_before_removal_loses() {
    let mut s = last_pair(1);
    s.tick(900);
    match_pair(&mut s, (1, 1), (1, 2));

    // The clock runs out 100ms in; the removal would land at 250ms.
    s.tick(300);
    assert_eq!(s.phase(), Phase::Lost);
    assert_eq!(s.time_left_secs(), 0);
    assert_eq!(s.tiles_left(), 2);
    assert!(!s
        .drain_events()
        .iter()
        .any(|e| matches!(e, SessionEvent::TilesRemoved { .. })));
}

#[test]
fn test_grace_counts_from_mid_tick_removal() {
    let mut s = last_pair(60);
    match_pair(&mut s, (1, 1), (1, 2));

    // Removal at 250ms, grace over at 750ms, all inside one long frame.
    s.tick(1000);
    assert_eq!(s.phase(), Phase::Won);
    assert_eq!(s.tiles_left(), 0);
}

#[test]
fn test_long_stall_ticks_every_second() {
    let mut s = started(strip(), level(1, 60));
    s.tick(10_500);
    assert_eq!(s.time_left_secs(), 50);
    let ticks = s
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, SessionEvent::TimeTick(_)))
        .count();
    assert_eq!(ticks, 10);

    s.tick(500);
    assert_eq!(s.time_left_secs(), 49);
}

#[test]
fn test_border_tiles_are_not_counted() {
    let board = Board::from_rows(&[
        vec![0, 0, 0, 0],
        vec![0, 1, 1, 0],
        vec![0, 0, 0, 2],
    ])
    .unwrap();
    let config = LevelConfig {
        interior_rows: 1,
        interior_cols: 2,
        ..level(1, 60)
    };
    let mut s = started(board, config);
    assert_eq!(s.tiles_left(), 2);

    match_pair(&mut s, (1, 1), (1, 2));
    s.tick(MATCH_RESOLVE_MS + FINISH_GRACE_MS);
    assert_eq!(s.phase(), Phase::Won);
}
