mod display;

use std::fs::File;
use std::io::{stdout, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_raid::config::GameConfig;
use space_raid::scene::Game;

use display::TerminalPort;

/// Vertical arcade shooter for the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// TOML config file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed RNG seed (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// Where log output goes; the terminal itself belongs to the game.
    #[arg(long, default_value = "space_raid.log")]
    log_file: PathBuf,

    /// Ring the terminal bell on explosions.
    #[arg(long)]
    bell: bool,
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let rng = match config.seed {
        Some(seed) => {
            info!("using fixed seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let rx = display::spawn_reader();
    let result = TerminalPort::new(
        &mut out,
        rx,
        config.screen.width,
        config.screen.height,
        cli.bell,
    )
    .map_err(anyhow::Error::from)
    .and_then(|port| {
        let mut game = Game::new(config, port, rng);
        game.run().map_err(anyhow::Error::from)
    });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!("game aborted: {e:#}");
    }
    result.context("game aborted")
}
