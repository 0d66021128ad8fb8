mod config;
mod errors;
mod generator;
mod layout;
mod models;
mod render;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

fn main() -> Result<()> {
    // Load configuration first (.env is optional, every variable has a default)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvgen v{}", env!("CARGO_PKG_VERSION"));

    let report = generator::generate(&config)
        .with_context(|| format!("Failed to generate {}", config.output_path.display()))?;
    info!(
        pages = report.page_count,
        bytes = report.bytes_written,
        "Done"
    );

    Ok(())
}
