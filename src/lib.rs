pub mod cli;
pub mod core;
pub mod providers;

pub use crate::core::config;

use crate::core::RateProvider;
use anyhow::{Context, Result};
use providers::{dolarapi::DolarApiProvider, exchangerate_api::ExchangeRateApiProvider};
use std::io::{BufRead, Write};
use tracing::{debug, info};

fn load_config(config_path: Option<&str>) -> Result<config::AppConfig> {
    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Wires the HTTP sources described by `config` into a rate provider.
pub fn build_provider(config: &config::AppConfig) -> Result<RateProvider> {
    let official = DolarApiProvider::new(config.dolarapi_base_url(), config.timeout())
        .context("Failed to create official dollar provider")?;
    let cross = ExchangeRateApiProvider::new(config.exchangerate_base_url(), config.timeout())
        .context("Failed to create exchange rate provider")?;
    Ok(RateProvider::new(Box::new(official), Box::new(cross)))
}

async fn run_session<R: BufRead, W: Write>(
    config_path: Option<&str>,
    input: R,
    output: W,
    colors: bool,
) -> Result<()> {
    info!("Currency converter starting...");

    let config = load_config(config_path)?;
    let provider = build_provider(&config)?;

    cli::shell::Shell::new(&provider, input, output)
        .with_colors(colors)
        .run()
        .await
}

/// Runs an interactive session on the given input and output, without styling.
pub async fn run_with_io<R: BufRead, W: Write>(
    config_path: Option<&str>,
    input: R,
    output: W,
) -> Result<()> {
    run_session(config_path, input, output, false).await
}

/// Runs an interactive session on the terminal.
pub async fn run(config_path: Option<&str>) -> Result<()> {
    let stdin = std::io::stdin();
    let colors = console::colors_enabled();
    run_session(config_path, stdin.lock(), std::io::stdout(), colors).await
}
