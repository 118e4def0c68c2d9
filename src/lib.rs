pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{CapmEngine, FundCatalog};
use crate::providers::{NewtonBetaProvider, YahooReturnProvider};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Funds,
    Calculate {
        ticker: String,
        principal: f64,
        years: f64,
        json: bool,
    },
}

/// Wires the standard catalog and the HTTP providers described by `config`.
pub fn build_engine(config: &AppConfig) -> CapmEngine {
    let newton = config.providers.newton();
    let yahoo = config.providers.yahoo();

    let beta_provider = NewtonBetaProvider::new(&newton.base_url, newton.timeout());
    let return_provider = YahooReturnProvider::new(&yahoo.base_url, yahoo.timeout());

    CapmEngine::new(
        Arc::new(FundCatalog::standard()),
        Arc::new(beta_provider),
        Arc::new(return_provider),
    )
    .with_risk_free_rate(config.risk_free_rate)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Mutual fund calculator starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let engine = build_engine(&config);

    match command {
        AppCommand::Funds => {
            cli::funds::run(engine.catalog());
            Ok(())
        }
        AppCommand::Calculate {
            ticker,
            principal,
            years,
            json,
        } => cli::calculate::run(&engine, &ticker, principal, years, json).await,
    }
}
