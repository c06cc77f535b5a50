mod app;
mod commands;
mod config;
mod effects;
mod render;

use anyhow::Context;
use feed_logging::feed_info;

fn main() -> anyhow::Result<()> {
    let path = config::config_path();
    let loaded = config::FeedConfig::load(&path)
        .with_context(|| format!("loading configuration from {}", path.display()))?;
    let from_file = loaded.is_some();
    let mut config = loaded.unwrap_or_default();
    config.apply_env_overrides();

    feed_logging::initialize(config.log_destination(), config.log_level()?);
    if from_file {
        feed_info!("Loaded configuration from {:?}", path);
    } else {
        feed_info!("No configuration at {:?}; using defaults", path);
    }

    app::run_app(config)
}
