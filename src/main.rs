use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::{LevelFilter, info};

use folio::{AppConfig, SceneKey};

/// A personal portfolio rendered as a handful of switchable 3D scenes.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scene to start in (intro, room, chess, walk)
    #[arg(short, long)]
    scene: Option<SceneKey>,

    /// Render as fast as possible instead of syncing to the display
    #[arg(long)]
    no_vsync: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::formatted_builder()
        .format_timestamp(None)
        .filter_level(LevelFilter::Info)
        .filter_module("wgpu_hal", LevelFilter::Off)
        .filter_module("wgpu_core", LevelFilter::Error)
        .filter_module("naga", LevelFilter::Off)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(scene) = cli.scene {
        config = config.start_scene(scene);
    }
    if cli.no_vsync {
        config = config.vsync(false);
    }

    info!("starting folio {}", env!("CARGO_PKG_VERSION"));
    folio::run(config)
}
