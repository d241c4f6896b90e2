//! Runtime configuration: command line, environment and logging.
//!
//! Every flag can also be set through a `TUI_PAIRS_*` environment variable.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use crate::core::LevelCatalog;
use crate::term::GlyphMode;

/// Connect-the-pair tile puzzle for the terminal.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tui-pairs", about, long_about = None, version)]
pub struct Args {
    /// Seed for board layouts and shuffles (time-based when omitted)
    #[arg(long, env = "TUI_PAIRS_SEED")]
    pub seed: Option<u32>,

    /// Start directly on this level instead of the menu
    #[arg(short, long, env = "TUI_PAIRS_LEVEL")]
    pub level: Option<u32>,

    /// JSON file replacing the builtin level list
    #[arg(long, env = "TUI_PAIRS_LEVELS")]
    pub levels: Option<PathBuf>,

    /// Make every level playable from the start
    #[arg(short, long, env = "TUI_PAIRS_UNLOCK_ALL", default_value_t = false)]
    pub unlock_all: bool,

    /// Draw tiles as symbols instead of letters
    #[arg(short, long, env = "TUI_PAIRS_GLYPHS", default_value_t = false)]
    pub glyphs: bool,

    /// Write log output to this file instead of stderr
    #[arg(long, env = "TUI_PAIRS_LOG_PATH")]
    pub log_path: Option<PathBuf>,
}

/// Resolved settings for one run
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub seed: u32,
    pub start_level: Option<u32>,
    pub catalog: LevelCatalog,
    pub unlock_all: bool,
    pub glyphs: GlyphMode,
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            start_level: None,
            catalog: LevelCatalog::builtin(),
            unlock_all: false,
            glyphs: GlyphMode::Letters,
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Resolve parsed arguments, loading the level file if one was given
    pub fn from_args(args: Args) -> Result<Self> {
        let catalog = match &args.levels {
            Some(path) => load_catalog(path)?,
            None => LevelCatalog::builtin(),
        };

        if let Some(level) = args.level {
            if catalog.get(level).is_none() {
                anyhow::bail!(
                    "level {} does not exist (catalog has {} levels)",
                    level,
                    catalog.len()
                );
            }
        }

        Ok(Self {
            seed: args.seed.unwrap_or_else(time_seed),
            start_level: args.level,
            catalog,
            unlock_all: args.unlock_all,
            glyphs: if args.glyphs {
                GlyphMode::Symbols
            } else {
                GlyphMode::Letters
            },
            log_path: args
                .log_path
                .filter(|p| !p.as_os_str().is_empty()),
        })
    }
}

/// Read and validate a JSON level list
pub fn load_catalog(path: &Path) -> Result<LevelCatalog> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read level file {}", path.display()))?;
    LevelCatalog::from_json(&text)
        .with_context(|| format!("invalid level file {}", path.display()))
}

/// Install the global logger. Defaults to `warn`; `RUST_LOG` overrides.
pub fn init_logging(log_path: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = log_path {
        let file = File::create(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init().context("logger already initialized")?;
    Ok(())
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
