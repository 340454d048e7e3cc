mod age;
mod app;
mod config;
mod decor;
mod render;
mod ticker;

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use app::App;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; the in-place frame owns stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = match config_path() {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            Config::load(&path)?
        }
        None => Config::builtin(),
    };
    info!(subjects = config.subjects.len(), "starting");

    App::from_config(config).run().await
}

fn config_path() -> Option<PathBuf> {
    env::args()
        .nth(1)
        .or_else(|| env::var("AGEWATCH_CONFIG").ok())
        .map(PathBuf::from)
}
