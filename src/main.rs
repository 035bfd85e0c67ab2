//! # Shadowmaze Main Entry Point
//!
//! Parses the command line, initializes logging, builds the first level, and
//! hands control to the macroquad frame loop.

use clap::Parser;
use log::{error, info};
use macroquad::prelude::*;
use shadowmaze::{GameConfig, GameState, InputHandler, SceneManager, ShadowmazeResult};
use std::path::PathBuf;

/// Command line arguments for Shadowmaze.
#[derive(Parser, Debug)]
#[command(name = "shadowmaze")]
#[command(about = "Collect the items and escape the monsters of a procedurally generated maze")]
#[command(version)]
struct Args {
    /// Random seed for maze generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Shadowmaze".to_string(),
        window_width: 1024,
        window_height: 768,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() -> ShadowmazeResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Shadowmaze v{}", shadowmaze::VERSION);

    if let Err(e) = run_game(&args).await {
        error!("Game error: {}", e);
        return Err(e);
    }
    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
        tracing::debug!("tracing subscriber installed with filter {}", log_level);
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_timestamp_millis()
            .init();
    }
}

/// Loads the configuration, builds the game, and runs the frame loop.
async fn run_game(args: &Args) -> ShadowmazeResult<()> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GameConfig::from_json_file(path)?
        }
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.generation.seed = seed;
    }

    info!(
        "Generating {}x{} maze with seed {}",
        config.generation.maze_width, config.generation.maze_height, config.generation.seed
    );
    let game_state = GameState::new(config)?;

    let mut scene_manager = SceneManager::new(game_state, InputHandler::new()).await?;
    scene_manager.run().await
}
