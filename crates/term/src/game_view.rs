//! GameView and MenuView: map session and catalog state into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::path::cells_along;
use crate::core::scoring::{combo_pitch_index, COMBO_PITCHES};
use crate::core::{LevelConfig, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, Position, EMPTY};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// How tile types are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlyphMode {
    /// `A`, `B`, `C`, ...
    #[default]
    Letters,
    /// Card suits, stars, shapes
    Symbols,
}

impl GlyphMode {
    pub fn toggled(self) -> Self {
        match self {
            GlyphMode::Letters => GlyphMode::Symbols,
            GlyphMode::Symbols => GlyphMode::Letters,
        }
    }
}

const TILE_COLORS: [Rgb; 16] = [
    Rgb::new(239, 68, 68),
    Rgb::new(59, 130, 246),
    Rgb::new(34, 197, 94),
    Rgb::new(234, 179, 8),
    Rgb::new(168, 85, 247),
    Rgb::new(236, 72, 153),
    Rgb::new(99, 102, 241),
    Rgb::new(249, 115, 22),
    Rgb::new(20, 184, 166),
    Rgb::new(6, 182, 212),
    Rgb::new(132, 204, 22),
    Rgb::new(244, 63, 94),
    Rgb::new(217, 70, 239),
    Rgb::new(14, 165, 233),
    Rgb::new(245, 158, 11),
    Rgb::new(16, 185, 129),
];

const TILE_SYMBOLS: [char; 16] = [
    '♠', '♥', '♦', '♣', '★', '●', '▲', '■', '◆', '♪', '☀', '☂', '✿', '☯', '⚑', '♞',
];

const BOARD_BG: Rgb = Rgb::new(22, 60, 40);
const TILE_BG: Rgb = Rgb::new(235, 235, 225);
const SELECT_BG: Rgb = Rgb::new(250, 204, 21);
const HINT_BG: Rgb = Rgb::new(34, 211, 238);
const PATH_FG: Rgb = Rgb::new(255, 0, 128);

/// Foreground color for a tile type
pub fn tile_color(cell: u8) -> Rgb {
    TILE_COLORS[(cell.max(1) as usize - 1) % TILE_COLORS.len()]
}

/// Character for a tile type in the given mode
pub fn tile_glyph(cell: u8, mode: GlyphMode) -> char {
    let index = (cell.max(1) as usize - 1) % TILE_SYMBOLS.len();
    match mode {
        GlyphMode::Letters => (b'A' + index as u8) as char,
        GlyphMode::Symbols => TILE_SYMBOLS[index],
    }
}

/// Board renderer. Each board cell is `cell_w` columns by one row.
pub struct GameView {
    cell_w: u16,
    glyphs: GlyphMode,
}

impl Default for GameView {
    fn default() -> Self {
        // Three columns per cell leaves room for a padded glyph and the cursor brackets.
        Self {
            cell_w: 3,
            glyphs: GlyphMode::Letters,
        }
    }
}

impl GameView {
    pub fn with_glyphs(mut self, glyphs: GlyphMode) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Render the session into an existing framebuffer.
    ///
    /// `cursor` is the keyboard cursor in board coordinates.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        cursor: Position,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let rows = snap.board.rows() as u16;
        let cols = snap.board.cols() as u16;
        let frame_w = cols * self.cell_w + 2;
        let frame_h = rows + 2;

        // HUD line sits above the frame.
        let block_h = frame_h + 1;
        let start_x = viewport.width.saturating_sub(frame_w + PANEL_W) / 2;
        let top = viewport.height.saturating_sub(block_h) / 2;
        let start_y = top + 1;

        self.draw_hud(fb, snap, start_x, top, frame_w);

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            cols * self.cell_w,
            rows,
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );
        fb.draw_box(start_x, start_y, frame_w, frame_h, border);

        for pos in snap.board.interior_positions() {
            if let Some(cell) = snap.board.get(pos).filter(|&c| c != EMPTY) {
                self.draw_tile(fb, snap, start_x, start_y, pos, cell);
            }
        }

        self.draw_path(fb, snap, start_x, start_y);

        if snap.playable() {
            self.draw_cursor(fb, snap, start_x, start_y, cursor);
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        match snap.phase {
            Phase::Won => self.draw_overlay(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                &["LEVEL CLEAR!", &format!("score {}", snap.score), "n next  r retry  m menu"],
                Rgb::new(34, 197, 94),
            ),
            Phase::Lost => self.draw_overlay(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                &["TIME UP", &format!("score {}", snap.score), "r retry  m menu"],
                Rgb::new(239, 68, 68),
            ),
            Phase::Init | Phase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, cursor: Position, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    /// Top-left terminal cell of board position `pos`
    fn cell_origin(&self, start_x: u16, start_y: u16, pos: Position) -> (u16, u16) {
        (
            start_x + 1 + pos.col as u16 * self.cell_w,
            start_y + 1 + pos.row as u16,
        )
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        start_x: u16,
        start_y: u16,
        pos: Position,
        cell: u8,
    ) {
        let bg = if snap.selection == Some(pos) {
            SELECT_BG
        } else if snap.is_hinted(pos) {
            HINT_BG
        } else {
            TILE_BG
        };
        let style = CellStyle::new(tile_color(cell), bg).bold();
        let (x, y) = self.cell_origin(start_x, start_y, pos);
        fb.fill_rect(x, y, self.cell_w, 1, ' ', style);
        fb.put_char(x + self.cell_w / 2, y, tile_glyph(cell, self.glyphs), style);
    }

    /// Draw the pending connection through the empty cells it crosses
    fn draw_path(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, start_x: u16, start_y: u16) {
        if snap.path.len() < 2 {
            return;
        }
        let cells = cells_along(&snap.path);
        let style = CellStyle::new(PATH_FG, BOARD_BG).bold();
        for (i, &pos) in cells.iter().enumerate() {
            if i == 0 || i + 1 == cells.len() {
                continue;
            }
            let (prev, next) = (cells[i - 1], cells[i + 1]);
            let (x, y) = self.cell_origin(start_x, start_y, pos);
            if prev.row == next.row {
                fb.fill_rect(x, y, self.cell_w, 1, '─', style);
            } else if prev.col == next.col {
                fb.put_char(x + self.cell_w / 2, y, '│', style);
            } else {
                fb.put_char(x + self.cell_w / 2, y, '●', style);
            }
        }
    }

    fn draw_cursor(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        start_x: u16,
        start_y: u16,
        cursor: Position,
    ) {
        if !snap.board.in_bounds(cursor) {
            return;
        }
        let (x, y) = self.cell_origin(start_x, start_y, cursor);
        let bg = fb.get(x, y).map(|c| c.style.bg).unwrap_or(BOARD_BG);
        let style = CellStyle::new(Rgb::WHITE, bg).bold();
        fb.put_char(x, y, '[', style);
        fb.put_char(x + self.cell_w - 1, y, ']', style);
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, x: u16, y: u16, frame_w: u16) {
        let label = CellStyle::new(Rgb::new(134, 239, 172), Rgb::BLACK).bold();
        let after = fb.put_str(x, y, &format!("LEVEL {} ", snap.level_id), label);
        fb.put_str(after, y, &snap.level_label, CellStyle::default());

        // Time bar on the right half of the HUD line.
        let bar_w = (frame_w / 2).max(4);
        let bar_x = x + frame_w.saturating_sub(bar_w);
        let limit = snap.time_limit_secs.max(1);
        let filled = (snap.time_left_secs.min(limit) * bar_w as u32 / limit) as u16;
        let color = if snap.time_low() {
            Rgb::new(239, 68, 68)
        } else {
            Rgb::new(74, 222, 128)
        };
        fb.fill_rect(bar_x, y, filled, 1, '█', CellStyle::new(color, Rgb::BLACK));
        fb.fill_rect(
            bar_x + filled,
            y,
            bar_w - filled,
            1,
            '░',
            CellStyle::new(Rgb::new(70, 70, 70), Rgb::BLACK),
        );
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::BLACK).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);

        let rows: [(&str, String); 6] = [
            ("SCORE", snap.score.to_string()),
            ("TIME", format!("{}s", snap.time_left_secs)),
            ("TILES", snap.tiles_left.to_string()),
            ("COMBO", combo_text(snap.combo)),
            ("HINTS", snap.hints_left.to_string()),
            ("SHUFFLES", snap.shuffles_left.to_string()),
        ];
        let mut y = start_y;
        for (name, text) in rows.iter() {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y + 1, text, value);
            y += 3;
        }

        let keys = value.dim();
        for line in ["space select", "t hint  x shuffle", "g glyphs  m menu"] {
            fb.put_str(panel_x, y, line, keys);
            y += 1;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
        accent: Rgb,
    ) {
        let box_w = lines
            .iter()
            .map(|l| l.chars().count() as u16)
            .max()
            .unwrap_or(0)
            + 4;
        let box_h = lines.len() as u16 + 2;
        let x = start_x + frame_w.saturating_sub(box_w) / 2;
        let y = start_y + frame_h.saturating_sub(box_h) / 2;

        let fill = CellStyle::new(Rgb::WHITE, Rgb::BLACK);
        fb.fill_rect(x, y, box_w, box_h, ' ', fill);
        fb.draw_box(x, y, box_w, box_h, CellStyle::new(accent, Rgb::BLACK));
        for (i, line) in lines.iter().enumerate() {
            let style = if i == 0 {
                CellStyle::new(accent, Rgb::BLACK).bold()
            } else {
                fill
            };
            fb.put_str_centered(x + 1, y + 1 + i as u16, box_w - 2, line, style);
        }
    }
}

/// Combo count plus a meter that climbs with the feedback pitch
fn combo_text(combo: u32) -> String {
    if combo < 2 {
        return "-".to_string();
    }
    let lit = combo_pitch_index(combo) as usize;
    let meter: String = (1..COMBO_PITCHES as usize)
        .map(|i| if i <= lit { '▮' } else { '▯' })
        .collect();
    format!("x{} {}", combo, meter)
}

/// Width reserved for the side panel
const PANEL_W: u16 = 20;

/// One line of the level menu
#[derive(Debug, Clone, Copy)]
pub struct MenuEntry<'a> {
    pub level: &'a LevelConfig,
    pub locked: bool,
}

/// Level-select screen
#[derive(Debug, Default)]
pub struct MenuView;

impl MenuView {
    pub fn render_into(
        &self,
        entries: &[MenuEntry<'_>],
        cursor: usize,
        unlock_all: bool,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let w = 44u16.min(viewport.width);
        let h = entries.len() as u16 * 2 + 5;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = viewport.height.saturating_sub(h) / 2;

        let title = CellStyle::new(Rgb::new(250, 204, 21), Rgb::BLACK).bold();
        fb.draw_box(x, y, w, h, CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK));
        fb.put_str_centered(x, y + 1, w, "PAIRS", title);

        let mut row = y + 3;
        for (i, entry) in entries.iter().enumerate() {
            let selected = i == cursor;
            let base = if entry.locked {
                CellStyle::new(Rgb::new(110, 110, 110), Rgb::BLACK)
            } else {
                CellStyle::default()
            };
            let style = if selected {
                CellStyle::new(Rgb::BLACK, Rgb::new(134, 239, 172)).bold()
            } else {
                base
            };
            let marker = if entry.locked { "locked" } else { "" };
            let line = format!(
                "{} {:>2}  {:<14}{}",
                if selected { '>' } else { ' ' },
                entry.level.id,
                entry.level.label,
                marker
            );
            fb.put_str(x + 2, row, &line, style);
            fb.put_str(x + 7, row + 1, &entry.level.description, base.dim());
            row += 2;
        }

        let footer = if unlock_all {
            "enter play  u relock  g glyphs  q quit"
        } else {
            "enter play  u unlock all  g glyphs  q quit"
        };
        fb.put_str_centered(x, y + h, w, footer, CellStyle::default().dim());
    }

    pub fn render(
        &self,
        entries: &[MenuEntry<'_>],
        cursor: usize,
        unlock_all: bool,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(entries, cursor, unlock_all, viewport, &mut fb);
        fb
    }
}
