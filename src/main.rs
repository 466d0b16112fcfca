use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use grid_snake::clock::SystemClock;
use grid_snake::collision::WallPolicy;
use grid_snake::config::{
    ConfigOverrides, GameConfig, GameOverAction, Variant, default_config_path,
};
use grid_snake::error::{ConfigError, GameError};
use grid_snake::game::Game;
use grid_snake::keyboard::KeyboardInput;
use grid_snake::renderer::TerminalRenderer;
use grid_snake::runtime::{self, RunEnd, Scoreboard};
use grid_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Built-in rule set to start from.
    #[arg(long, value_enum, default_value_t = Variant::Classic)]
    variant: Variant,

    /// JSON file with settings layered over the variant.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds between ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Wrap around the edges instead of dying on them.
    #[arg(long)]
    wrap: bool,

    /// Start a new game after a game over instead of exiting.
    #[arg(long)]
    restart: bool,

    /// Seed for food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

/// Collects final scores and prints them once the terminal is restored.
#[derive(Debug, Default)]
struct ConsoleScoreboard {
    scores: Vec<u32>,
}

impl Scoreboard for ConsoleScoreboard {
    fn report_final_score(&mut self, score: u32) {
        info!(score, "final score");
        self.scores.push(score);
    }
}

fn main() -> Result<(), GameError> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = build_config(&cli)?;
    let mut game = Game::new(config)?;

    install_panic_hook();

    let mut scoreboard = ConsoleScoreboard::default();
    let outcome = {
        let mut renderer = TerminalRenderer::new(TerminalSession::enter()?);
        runtime::run(
            &mut game,
            &mut KeyboardInput::new(),
            &mut renderer,
            &mut scoreboard,
            &mut SystemClock::new(),
        )
    };

    for score in &scoreboard.scores {
        println!("Game Over! Your Score: {score}");
    }

    match outcome? {
        RunEnd::Quit => info!("session ended by player"),
        RunEnd::GameOver { final_score } => info!(final_score, "session ended"),
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let mut config = GameConfig::for_variant(cli.variant);

    let file = match &cli.config {
        Some(path) => Some(path.clone()),
        None => default_config_path().filter(|path| path.is_file()),
    };
    if let Some(path) = file {
        config.apply(ConfigOverrides::load(&path)?);
    }

    config.apply(ConfigOverrides {
        tick_interval_ms: cli.tick_ms,
        wall_policy: cli.wrap.then_some(WallPolicy::Wrap),
        on_game_over: cli.restart.then_some(GameOverAction::Restart),
        seed: cli.seed,
        ..ConfigOverrides::default()
    });

    config.validate()?;
    Ok(config)
}

fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
