//! Application shell - level menu, unlock progress and the active session
//!
//! The shell owns the only state that outlives a level attempt: the highest
//! unlocked level (in memory only) and display preferences. Each attempt is a
//! fresh [`Session`] whose random source is drawn from the shell's own seed,
//! so a fixed seed replays a whole run.

use log::{debug, info};

use crate::config::AppConfig;
use crate::core::{LevelCatalog, Session, SessionEvent, SimpleRng};
use crate::input::{Command, Direction, InputContext};
use crate::term::{GlyphMode, MenuEntry};
use crate::types::{Intent, Position};

/// What is on screen
#[derive(Debug, Clone)]
pub enum Screen {
    /// Level list; `cursor` indexes the catalog
    Menu { cursor: usize },
    /// A level attempt with the keyboard cursor on the board
    Game { session: Session, cursor: Position },
}

pub struct App {
    catalog: LevelCatalog,
    screen: Screen,
    /// Highest level id the player may open
    unlocked: u32,
    unlock_all: bool,
    glyphs: GlyphMode,
    rng: SimpleRng,
}

impl App {
    pub fn new(catalog: LevelCatalog, seed: u32) -> Self {
        Self {
            catalog,
            screen: Screen::Menu { cursor: 0 },
            unlocked: 1,
            unlock_all: false,
            glyphs: GlyphMode::Letters,
            rng: SimpleRng::new(seed),
        }
    }

    /// Build from resolved configuration, opening the start level if one was requested
    pub fn from_config(config: AppConfig) -> Self {
        let mut app = Self::new(config.catalog, config.seed);
        app.unlock_all = config.unlock_all;
        app.glyphs = config.glyphs;
        if let Some(id) = config.start_level {
            // An explicit start level is always allowed.
            app.unlocked = app.unlocked.max(id.min(app.catalog.last_id()));
            app.open_level(id);
        }
        app
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.screen {
            Screen::Game { session, .. } => Some(session),
            Screen::Menu { .. } => None,
        }
    }

    pub fn unlocked(&self) -> u32 {
        self.unlocked
    }

    pub fn unlock_all(&self) -> bool {
        self.unlock_all
    }

    pub fn set_unlock_all(&mut self, on: bool) {
        self.unlock_all = on;
    }

    pub fn glyphs(&self) -> GlyphMode {
        self.glyphs
    }

    pub fn is_unlocked(&self, id: u32) -> bool {
        self.unlock_all || id <= self.unlocked
    }

    pub fn input_context(&self) -> InputContext {
        match self.screen {
            Screen::Menu { .. } => InputContext::Menu,
            Screen::Game { .. } => InputContext::Game,
        }
    }

    /// Menu lines with their lock state
    pub fn menu_entries(&self) -> Vec<MenuEntry<'_>> {
        self.catalog
            .iter()
            .map(|level| MenuEntry {
                level,
                locked: !self.is_unlocked(level.id),
            })
            .collect()
    }

    /// Start a fresh attempt at level `id`. Refused for unknown or locked levels.
    pub fn open_level(&mut self, id: u32) -> bool {
        if !self.is_unlocked(id) {
            debug!("level {} is locked", id);
            return false;
        }
        let Some(level) = self.catalog.get(id).cloned() else {
            return false;
        };

        let rng = SimpleRng::new(self.rng.next_u32());
        let mut session = Session::new(level, rng);
        session.start();
        self.screen = Screen::Game {
            session,
            cursor: Position::new(1, 1),
        };
        true
    }

    /// Record a win. Only winning the newest unlocked level raises the mark.
    pub fn level_completed(&mut self, id: u32) {
        if id == self.unlocked && self.unlocked < self.catalog.last_id() {
            self.unlocked += 1;
            info!("level {} completed, unlocked level {}", id, self.unlocked);
        }
    }

    /// After a win, open the next level, or go back to the menu after the last one.
    pub fn advance(&mut self) -> bool {
        let Some(id) = self.session().and_then(|s| s.completed_level()) else {
            return false;
        };
        match self.catalog.next_after(id).map(|level| level.id) {
            Some(next) => self.open_level(next),
            None => {
                self.return_to_menu();
                true
            }
        }
    }

    pub fn retry(&mut self) -> bool {
        match &mut self.screen {
            Screen::Game { session, cursor } => {
                session.retry();
                *cursor = Position::new(1, 1);
                true
            }
            Screen::Menu { .. } => false,
        }
    }

    /// Leave the current attempt; the menu cursor lands on its level
    pub fn return_to_menu(&mut self) {
        let cursor = self
            .session()
            .map(|s| s.level().id.saturating_sub(1) as usize)
            .unwrap_or(0);
        self.screen = Screen::Menu { cursor };
    }

    /// Advance the active session's clock. Returns true if a redraw is due.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let changed = match &mut self.screen {
            Screen::Game { session, .. } => session.tick(elapsed_ms),
            Screen::Menu { .. } => false,
        };
        self.pump_events();
        changed
    }

    /// Apply a key command. Returns true if a redraw is due.
    pub fn handle_command(&mut self, command: Command) -> bool {
        let handled = match command {
            Command::ToggleGlyphs => {
                self.glyphs = self.glyphs.toggled();
                true
            }
            Command::ToggleUnlockAll => {
                self.unlock_all = !self.unlock_all;
                info!("unlock all: {}", self.unlock_all);
                true
            }
            Command::Retry => self.retry(),
            Command::NextLevel => self.advance(),
            Command::Menu => {
                self.return_to_menu();
                true
            }
            Command::Move(dir) => self.move_cursor(dir),
            Command::Confirm => self.confirm(),
            Command::Hint => self.apply_intent(Intent::Hint),
            Command::Shuffle => self.apply_intent(Intent::Shuffle),
        };
        self.pump_events();
        handled
    }

    fn move_cursor(&mut self, dir: Direction) -> bool {
        let levels = self.catalog.len();
        match &mut self.screen {
            Screen::Menu { cursor } => {
                *cursor = match dir {
                    Direction::Up => cursor.saturating_sub(1),
                    Direction::Down => (*cursor + 1).min(levels.saturating_sub(1)),
                    Direction::Left | Direction::Right => return false,
                };
                true
            }
            Screen::Game { session, cursor } => {
                let board = session.board();
                *cursor = dir.step(*cursor, board.rows(), board.cols());
                true
            }
        }
    }

    fn confirm(&mut self) -> bool {
        match &self.screen {
            Screen::Menu { cursor } => {
                let id = *cursor as u32 + 1;
                self.open_level(id)
            }
            Screen::Game { cursor, .. } => {
                let pos = *cursor;
                self.apply_intent(Intent::Select(pos))
            }
        }
    }

    fn apply_intent(&mut self, intent: Intent) -> bool {
        match &mut self.screen {
            Screen::Game { session, .. } => session.apply_intent(intent),
            Screen::Menu { .. } => false,
        }
    }

    /// Consume session events; the shell only cares about wins
    fn pump_events(&mut self) {
        let Screen::Game { session, .. } = &mut self.screen else {
            return;
        };
        let id = session.level().id;
        let mut won = false;
        for event in session.drain_events() {
            debug!("level {}: {:?}", id, event);
            won |= matches!(event, SessionEvent::Won { .. });
        }
        if won {
            self.level_completed(id);
        }
    }
}
