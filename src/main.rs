//! Terminal pairs runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `tui_pairs::term`.
//! The loop polls for keys until the next frame is due, then advances the
//! session clock by the real elapsed time.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use tui_pairs::app::{App, Screen};
use tui_pairs::config::{init_logging, AppConfig, Args};
use tui_pairs::input::{map_key, should_quit};
use tui_pairs::term::{FrameBuffer, GameView, MenuView, TerminalRenderer, Viewport};
use tui_pairs::types::TICK_MS;

fn main() -> Result<()> {
    let config = AppConfig::from_args(Args::parse())?;
    init_logging(config.log_path.as_deref())?;
    info!("starting with seed {}", config.seed);

    let mut app = App::from_config(config);
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let menu_view = MenuView;
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let viewport = Viewport::new(w, h);
            match app.screen() {
                Screen::Menu { cursor } => {
                    let entries = app.menu_entries();
                    menu_view.render_into(&entries, *cursor, app.unlock_all(), viewport, &mut fb);
                }
                Screen::Game { session, cursor } => {
                    let view = GameView::default().with_glyphs(app.glyphs());
                    view.render_into(&session.snapshot(), *cursor, viewport, &mut fb);
                }
            }
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = map_key(key, app.input_context()) {
                        dirty |= app.handle_command(command);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            dirty |= app.tick(elapsed_ms);
        }
    }
}
