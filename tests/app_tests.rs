//! App shell tests - menu navigation, unlock progress and level flow

use serde_json::json;

use tui_pairs::core::LevelCatalog;
use tui_pairs::input::{Command, Direction, InputContext};
use tui_pairs::term::GlyphMode;
use tui_pairs::types::{Phase, Position, FINISH_GRACE_MS, MATCH_RESOLVE_MS};
use tui_pairs::{App, AppConfig, Screen};

/// Levels of a single adjacent pair, so every attempt is winnable in two picks
fn tiny_catalog(levels: u32) -> LevelCatalog {
    let list: Vec<_> = (1..=levels)
        .map(|id| {
            json!({
                "id": id,
                "interiorRows": 1,
                "interiorCols": 2,
                "tileTypeCount": 1,
                "timeLimitSeconds": 30,
                "label": format!("Tiny {}", id),
            })
        })
        .collect();
    LevelCatalog::from_json(&json!(list).to_string()).unwrap()
}

fn current_level(app: &App) -> Option<u32> {
    app.session().map(|s| s.level().id)
}

/// Select both tiles of the pair with the keyboard and let the session finish
fn win_current_level(app: &mut App) {
    assert!(app.handle_command(Command::Confirm));
    assert!(app.handle_command(Command::Move(Direction::Right)));
    assert!(app.handle_command(Command::Confirm));
    app.tick(MATCH_RESOLVE_MS);
    app.tick(FINISH_GRACE_MS);
    assert_eq!(app.session().map(|s| s.phase()), Some(Phase::Won));
}

#[test]
fn test_tiny_catalog_parses() {
    let catalog = tiny_catalog(3);
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.get(2).map(|l| l.label.as_str()), Some("Tiny 2"));
    assert_eq!(catalog.get(2).map(|l| l.description.as_str()), Some(""));
}

#[test]
fn test_winning_unlocks_and_advances() {
    let mut app = App::new(tiny_catalog(3), 7);
    assert_eq!(app.input_context(), InputContext::Menu);

    assert!(app.handle_command(Command::Confirm));
    assert_eq!(current_level(&app), Some(1));
    assert_eq!(app.input_context(), InputContext::Game);

    win_current_level(&mut app);
    assert_eq!(app.unlocked(), 2);

    assert!(app.handle_command(Command::NextLevel));
    assert_eq!(current_level(&app), Some(2));
    assert_eq!(app.session().map(|s| s.phase()), Some(Phase::Playing));

    win_current_level(&mut app);
    assert!(app.handle_command(Command::NextLevel));
    win_current_level(&mut app);
    assert_eq!(app.unlocked(), 3);

    // Past the last level the shell returns to the menu on that level.
    assert!(app.handle_command(Command::NextLevel));
    assert!(matches!(app.screen(), Screen::Menu { cursor: 2 }));
}

#[test]
fn test_replaying_old_level_does_not_skip_ahead() {
    let mut app = App::new(tiny_catalog(3), 7);
    app.handle_command(Command::Confirm);
    win_current_level(&mut app);
    assert_eq!(app.unlocked(), 2);

    app.handle_command(Command::Menu);
    assert!(matches!(app.screen(), Screen::Menu { cursor: 0 }));
    app.handle_command(Command::Confirm);
    win_current_level(&mut app);
    assert_eq!(app.unlocked(), 2);
}

#[test]
fn test_locked_menu_entry_cannot_be_opened() {
    let mut app = App::new(tiny_catalog(3), 7);
    app.handle_command(Command::Move(Direction::Down));
    assert!(!app.handle_command(Command::Confirm));
    assert!(matches!(app.screen(), Screen::Menu { cursor: 1 }));

    assert!(app.handle_command(Command::ToggleUnlockAll));
    assert!(app.handle_command(Command::Confirm));
    assert_eq!(current_level(&app), Some(2));
}

#[test]
fn test_retry_after_loss_restores_clock() {
    let mut app = App::new(tiny_catalog(1), 3);
    app.handle_command(Command::Confirm);
    for _ in 0..30 {
        app.tick(1000);
    }
    assert_eq!(app.session().map(|s| s.phase()), Some(Phase::Lost));
    assert!(!app.handle_command(Command::NextLevel));

    assert!(app.handle_command(Command::Retry));
    let session = app.session().unwrap();
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.time_left_secs(), 30);
    assert_eq!(session.tiles_left(), 2);
    assert!(matches!(
        app.screen(),
        Screen::Game { cursor, .. } if *cursor == Position::new(1, 1)
    ));
}

#[test]
fn test_game_cursor_stays_on_board() {
    let mut app = App::new(tiny_catalog(1), 3);
    app.handle_command(Command::Confirm);
    for _ in 0..10 {
        app.handle_command(Command::Move(Direction::Up));
        app.handle_command(Command::Move(Direction::Left));
    }
    assert!(matches!(
        app.screen(),
        Screen::Game { cursor, .. } if *cursor == Position::new(0, 0)
    ));
    // Selecting the empty border is ignored.
    assert!(!app.handle_command(Command::Confirm));
}

#[test]
fn test_config_start_level_opens_game() {
    let app = App::from_config(AppConfig {
        start_level: Some(3),
        glyphs: GlyphMode::Symbols,
        ..AppConfig::default()
    });
    assert_eq!(current_level(&app), Some(3));
    assert!(app.is_unlocked(3));
    assert!(!app.is_unlocked(4));
    assert_eq!(app.glyphs(), GlyphMode::Symbols);
}

#[test]
fn test_same_seed_replays_same_boards() {
    let mut a = App::new(LevelCatalog::builtin(), 42);
    let mut b = App::new(LevelCatalog::builtin(), 42);
    a.open_level(1);
    b.open_level(1);
    assert_eq!(
        a.session().map(|s| s.board().clone()),
        b.session().map(|s| s.board().clone())
    );
}
