//! Key mapping from terminal events to shell commands.

use crate::types::Position;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which screen is receiving keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    Menu,
    Game,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Move `pos` one step, staying inside `rows × cols`
    pub fn step(self, pos: Position, rows: usize, cols: usize) -> Position {
        let mut next = pos;
        match self {
            Direction::Up => next.row = next.row.saturating_sub(1),
            Direction::Down => next.row = (next.row + 1).min(rows.saturating_sub(1)),
            Direction::Left => next.col = next.col.saturating_sub(1),
            Direction::Right => next.col = (next.col + 1).min(cols.saturating_sub(1)),
        }
        next
    }
}

/// What the shell should do in response to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    /// Select the tile under the cursor, or open the highlighted level
    Confirm,
    Hint,
    Shuffle,
    Retry,
    NextLevel,
    Menu,
    ToggleGlyphs,
    ToggleUnlockAll,
}

/// Map keyboard input to a command for the given screen.
pub fn map_key(key: KeyEvent, context: InputContext) -> Option<Command> {
    let command = match key.code {
        // Movement
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Command::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Command::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Command::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            Command::Move(Direction::Right)
        }

        KeyCode::Char(' ') | KeyCode::Enter => Command::Confirm,
        KeyCode::Char('g') | KeyCode::Char('G') => Command::ToggleGlyphs,

        // Board-only
        KeyCode::Char('t') | KeyCode::Char('T') if context == InputContext::Game => Command::Hint,
        KeyCode::Char('x') | KeyCode::Char('X') if context == InputContext::Game => {
            Command::Shuffle
        }
        KeyCode::Char('r') | KeyCode::Char('R') if context == InputContext::Game => {
            Command::Retry
        }
        KeyCode::Char('n') | KeyCode::Char('N') if context == InputContext::Game => {
            Command::NextLevel
        }
        KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc
            if context == InputContext::Game =>
        {
            Command::Menu
        }

        // Menu-only
        KeyCode::Char('u') | KeyCode::Char('U') if context == InputContext::Menu => {
            Command::ToggleUnlockAll
        }

        _ => return None,
    };
    Some(command)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
