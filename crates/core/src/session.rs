//! Session module - one attempt at one level
//!
//! The session owns the live board and every counter for the attempt. Player
//! intents arrive through [`Session::apply_intent`]; time arrives through
//! [`Session::tick`] with the elapsed milliseconds since the previous call.
//! Everything the presentation layer needs to react to is queued as a
//! [`SessionEvent`] and pulled with [`Session::drain_events`].
//!
//! Delayed effects (match removal, hint expiry, combo reset, the win grace)
//! are [`Timers`] slots owned by the session and cancelled together whenever
//! the session leaves `Playing`.

use log::{debug, info, warn};

use crate::board::Board;
use crate::catalog::LevelConfig;
use crate::generator::generate;
use crate::hint::{find_connectable_pair, is_deadlocked};
use crate::path::{connect, Path};
use crate::rng::{SimpleRng, TileRng};
use crate::scoring::{apply_penalty, match_score, time_bonus_secs};
use crate::shuffle::{shuffle, shuffle_until_playable};
use crate::snapshot::SessionSnapshot;
use crate::timers::{Deferred, Timers};
use crate::types::*;

/// Something the presentation layer may want to show or play
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    TileSelected(Position),
    TileDeselected(Position),
    /// A pair connected; the tiles leave the board after [`MATCH_RESOLVE_MS`].
    /// `combo` is the count before this match, for feedback pitch.
    MatchSucceeded {
        first: Position,
        second: Position,
        path: Path,
        combo: u32,
        score_delta: u32,
    },
    /// Second pick did not match the first (wrong type or no path)
    MatchFailed { first: Position, second: Position },
    /// A resolved match cleared its two cells
    TilesRemoved { first: Position, second: Position },
    HintRevealed {
        pair: (Position, Position),
        expires_in_ms: u32,
    },
    HintCleared,
    BoardReplaced { kind: ShuffleKind },
    /// Seconds remaining after a clock tick
    TimeTick(u32),
    TimeLow(u32),
    Won { score: u32 },
    Lost { score: u32 },
}

/// A connected pair waiting for its removal delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingMatch {
    first: Position,
    second: Position,
    score_delta: u32,
}

/// State for a single level attempt
#[derive(Debug, Clone)]
pub struct Session<R: TileRng = SimpleRng> {
    level: LevelConfig,
    board: Board,
    rng: R,
    phase: Phase,
    selection: Option<(Position, Cell)>,
    hint: Option<(Position, Position)>,
    /// Path of the match being resolved (empty otherwise)
    path: Path,
    pending: Option<PendingMatch>,
    score: u32,
    combo: u32,
    time_left_secs: u32,
    /// Milliseconds accumulated toward the next clock tick
    clock_ms: u32,
    clock_running: bool,
    tiles_left: usize,
    hints_left: u8,
    shuffles_left: u8,
    timers: Timers,
    events: Vec<SessionEvent>,
}

impl<R: TileRng> Session<R> {
    /// Generate a fresh board for `level`. The session starts in `Init`.
    pub fn new(level: LevelConfig, mut rng: R) -> Self {
        let board = generate(
            level.board_rows(),
            level.board_cols(),
            level.tile_type_count,
            &mut rng,
        );
        Self::with_board(level, board, rng)
    }

    /// Use a prepared board instead of generating one
    pub fn with_board(level: LevelConfig, board: Board, rng: R) -> Self {
        let mut session = Self {
            level,
            board: Board::default(),
            rng,
            phase: Phase::Init,
            selection: None,
            hint: None,
            path: Path::new(),
            pending: None,
            score: 0,
            combo: 0,
            time_left_secs: 0,
            clock_ms: 0,
            clock_running: false,
            tiles_left: 0,
            hints_left: 0,
            shuffles_left: 0,
            timers: Timers::new(),
            events: Vec::new(),
        };
        session.reset(board);
        session
    }

    fn reset(&mut self, board: Board) {
        self.tiles_left = board.tile_count();
        self.board = board;
        self.phase = Phase::Init;
        self.selection = None;
        self.hint = None;
        self.path.clear();
        self.pending = None;
        self.score = 0;
        self.combo = 0;
        self.time_left_secs = self.level.time_limit_seconds;
        self.clock_ms = 0;
        self.clock_running = false;
        self.hints_left = HINT_QUOTA;
        self.shuffles_left = SHUFFLE_QUOTA;
        self.timers.cancel_all();
        self.events.clear();
    }

    /// Enter `Playing` and start the clock. No-op unless in `Init`.
    pub fn start(&mut self) {
        if self.phase != Phase::Init {
            return;
        }
        self.phase = Phase::Playing;
        self.clock_running = true;
        info!(
            "level {} started: {} tiles, {}s",
            self.level.id, self.tiles_left, self.time_left_secs
        );
        self.check_liveness();
    }

    /// Discard this attempt and start over on a new board of the same level
    pub fn retry(&mut self) {
        let board = generate(
            self.level.board_rows(),
            self.level.board_cols(),
            self.level.tile_type_count,
            &mut self.rng,
        );
        self.reset(board);
        self.start();
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    pub fn tiles_left(&self) -> usize {
        self.tiles_left
    }

    pub fn hints_left(&self) -> u8 {
        self.hints_left
    }

    pub fn shuffles_left(&self) -> u8 {
        self.shuffles_left
    }

    pub fn selection(&self) -> Option<Position> {
        self.selection.map(|(pos, _)| pos)
    }

    pub fn hint(&self) -> Option<(Position, Position)> {
        self.hint
    }

    /// Connection currently on display, empty when none
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock_running
    }

    /// The level id once this attempt is won
    pub fn completed_level(&self) -> Option<u32> {
        (self.phase == Phase::Won).then_some(self.level.id)
    }

    /// Take every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.level_id = self.level.id;
        out.level_label.clone_from(&self.level.label);
        out.time_limit_secs = self.level.time_limit_seconds;
        out.board.clone_from(&self.board);
        out.phase = self.phase;
        out.selection = self.selection();
        out.hint = self.hint;
        out.path.clone_from(&self.path);
        out.score = self.score;
        out.combo = self.combo;
        out.time_left_secs = self.time_left_secs;
        out.tiles_left = self.tiles_left;
        out.hints_left = self.hints_left;
        out.shuffles_left = self.shuffles_left;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a player intent. Returns whether it was accepted.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.flush_pending_match();
        if self.phase != Phase::Playing {
            return false;
        }

        match intent {
            Intent::Select(pos) => self.select(pos),
            Intent::Hint => self.request_hint(),
            Intent::Shuffle => self.request_shuffle(),
        }
    }

    /// Advance deferred effects and the countdown by `elapsed_ms`.
    ///
    /// The interval is walked in time order: it is split at every timer
    /// deadline and every clock second, so an effect due after the clock runs
    /// out never happens, and timers scheduled partway through keep counting
    /// with the time that is left. Effects due at the same instant as a clock
    /// second run first.
    ///
    /// Returns true if anything observable changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let mut changed = false;
        let mut left = elapsed_ms;

        while self.phase == Phase::Playing {
            let to_clock = self
                .clock_running
                .then(|| CLOCK_TICK_MS - self.clock_ms);
            let step = self
                .timers
                .next_due()
                .into_iter()
                .chain(to_clock)
                .fold(left, u32::min);

            left -= step;
            if self.clock_running {
                self.clock_ms += step;
            }

            let fired = self.timers.advance(step);
            let mut progressed = !fired.is_empty();
            for purpose in fired {
                self.fire(purpose);
                if self.phase != Phase::Playing {
                    return true;
                }
            }

            if self.clock_running && self.clock_ms >= CLOCK_TICK_MS {
                self.clock_ms -= CLOCK_TICK_MS;
                self.clock_tick();
                progressed = true;
            }

            changed |= progressed;
            if left == 0 && !progressed {
                break;
            }
        }
        changed
    }

    fn fire(&mut self, purpose: Deferred) {
        match purpose {
            Deferred::ResolveMatch => self.resolve_pending_match(),
            Deferred::ExpireHint => {
                if self.hint.take().is_some() {
                    self.events.push(SessionEvent::HintCleared);
                }
            }
            Deferred::ResetCombo => self.combo = 0,
            Deferred::Finish => {
                if self.tiles_left == 0 {
                    self.end(Phase::Won);
                }
            }
        }
    }

    fn clock_tick(&mut self) {
        self.time_left_secs = self.time_left_secs.saturating_sub(1);
        self.events.push(SessionEvent::TimeTick(self.time_left_secs));
        if self.time_left_secs == 0 {
            self.end(Phase::Lost);
        } else if self.time_left_secs <= TIME_LOW_THRESHOLD_SECS {
            self.events.push(SessionEvent::TimeLow(self.time_left_secs));
        }
    }

    fn select(&mut self, pos: Position) -> bool {
        let cell = match self.board.get(pos) {
            Some(c) if c != EMPTY => c,
            _ => return false,
        };
        self.clear_hint();

        let Some((first, first_type)) = self.selection else {
            self.selection = Some((pos, cell));
            self.events.push(SessionEvent::TileSelected(pos));
            return true;
        };

        if first == pos {
            self.selection = None;
            self.events.push(SessionEvent::TileDeselected(pos));
            return true;
        }

        let path = if first_type == cell {
            connect(&self.board, first, pos)
        } else {
            None
        };

        match path {
            Some(path) => self.begin_match(first, pos, path),
            None => {
                debug!("no connection between {} and {}", first, pos);
                self.events.push(SessionEvent::MatchFailed { first, second: pos });
                self.selection = Some((pos, cell));
                self.events.push(SessionEvent::TileSelected(pos));
                self.break_combo();
            }
        }
        true
    }

    fn begin_match(&mut self, first: Position, second: Position, path: Path) {
        let score_delta = match_score(path.len(), self.combo);
        debug!(
            "matched {} and {} with {} point path, combo {}",
            first,
            second,
            path.len(),
            self.combo
        );
        self.events.push(SessionEvent::MatchSucceeded {
            first,
            second,
            path: path.clone(),
            combo: self.combo,
            score_delta,
        });

        self.combo = self.combo.saturating_add(1);
        self.timers.schedule(Deferred::ResetCombo, COMBO_WINDOW_MS);

        self.path = path;
        self.pending = Some(PendingMatch {
            first,
            second,
            score_delta,
        });
        self.timers.schedule(Deferred::ResolveMatch, MATCH_RESOLVE_MS);
    }

    /// Resolve a pending match now instead of waiting for its timer
    fn flush_pending_match(&mut self) {
        if self.pending.is_some() {
            self.timers.cancel(Deferred::ResolveMatch);
            self.resolve_pending_match();
        }
    }

    fn resolve_pending_match(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        self.board.set(pending.first, EMPTY);
        self.board.set(pending.second, EMPTY);
        self.selection = None;
        self.path.clear();
        self.score = self.score.saturating_add(pending.score_delta);
        self.time_left_secs = self
            .time_left_secs
            .saturating_add(time_bonus_secs(self.level.id));
        self.tiles_left = self.tiles_left.saturating_sub(2);
        self.events.push(SessionEvent::TilesRemoved {
            first: pending.first,
            second: pending.second,
        });
        self.check_liveness();
    }

    fn break_combo(&mut self) {
        self.combo = 0;
        self.timers.cancel(Deferred::ResetCombo);
    }

    fn clear_hint(&mut self) {
        self.timers.cancel(Deferred::ExpireHint);
        if self.hint.take().is_some() {
            self.events.push(SessionEvent::HintCleared);
        }
    }

    fn drop_selection(&mut self) {
        if let Some((pos, _)) = self.selection.take() {
            self.events.push(SessionEvent::TileDeselected(pos));
        }
    }

    fn request_hint(&mut self) -> bool {
        if self.hints_left == 0 || self.tiles_left == 0 {
            return false;
        }
        self.hints_left -= 1;

        // A credit is spent even if the scan comes up empty.
        if let Some(pair) = find_connectable_pair(&self.board) {
            self.hint = Some(pair);
            self.score = apply_penalty(self.score, HINT_PENALTY);
            self.timers.schedule(Deferred::ExpireHint, HINT_DISPLAY_MS);
            self.events.push(SessionEvent::HintRevealed {
                pair,
                expires_in_ms: HINT_DISPLAY_MS,
            });
        }
        true
    }

    fn request_shuffle(&mut self) -> bool {
        if self.shuffles_left == 0 || self.tiles_left == 0 {
            return false;
        }
        self.shuffles_left -= 1;
        self.drop_selection();
        self.clear_hint();

        let outcome = shuffle_until_playable(&self.board, &mut self.rng, MANUAL_SHUFFLE_RETRIES);
        self.board = outcome.board;
        self.score = apply_penalty(self.score, SHUFFLE_PENALTY);
        self.events.push(SessionEvent::BoardReplaced {
            kind: ShuffleKind::Manual,
        });
        self.check_liveness();
        true
    }

    /// Run after every board mutation: finish a cleared board, or reshuffle a
    /// dead one until a move exists.
    fn check_liveness(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }

        if self.tiles_left == 0 {
            if !self.timers.is_pending(Deferred::Finish) {
                self.clock_running = false;
                self.timers.schedule(Deferred::Finish, FINISH_GRACE_MS);
            }
            return;
        }

        let mut attempts = 0;
        while is_deadlocked(&self.board) {
            if attempts == SILENT_SHUFFLE_LIMIT {
                warn!(
                    "board still deadlocked after {} silent shuffles ({} tiles)",
                    attempts, self.tiles_left
                );
                break;
            }
            self.board = shuffle(&self.board, &mut self.rng);
            attempts += 1;
        }

        if attempts > 0 {
            info!("deadlock cleared by {} silent shuffle(s)", attempts);
            self.drop_selection();
            self.clear_hint();
            self.events.push(SessionEvent::BoardReplaced {
                kind: ShuffleKind::Silent,
            });
        }
    }

    fn end(&mut self, phase: Phase) {
        self.phase = phase;
        self.timers.cancel_all();
        self.clock_running = false;
        self.pending = None;
        self.selection = None;
        self.hint = None;
        self.path.clear();

        let score = self.score;
        match phase {
            Phase::Won => {
                info!("level {} won with score {}", self.level.id, score);
                self.events.push(SessionEvent::Won { score });
            }
            Phase::Lost => {
                info!(
                    "level {} lost with {} tiles left, score {}",
                    self.level.id, self.tiles_left, score
                );
                self.events.push(SessionEvent::Lost { score });
            }
            Phase::Init | Phase::Playing => {}
        }
    }
}
