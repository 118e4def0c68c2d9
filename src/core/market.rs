//! Market data abstractions consumed by the CAPM engine

use crate::core::error::CalcError;
use async_trait::async_trait;

/// Benchmark index the beta is measured against.
pub const BENCHMARK_INDEX: &str = "^GSPC";
/// Sampling interval for the beta regression.
pub const BETA_INTERVAL: &str = "1mo";
/// Number of observations in the rolling beta window.
pub const BETA_OBSERVATIONS: u32 = 12;

/// Source of a fund's rolling beta against [`BENCHMARK_INDEX`].
#[async_trait]
pub trait BetaProvider: Send + Sync {
    async fn fetch_beta(&self, ticker: &str) -> Result<f64, CalcError>;
}

/// Source of a fund's expected annual return as a decimal fraction.
#[async_trait]
pub trait ReturnProvider: Send + Sync {
    async fn fetch_expected_return(&self, ticker: &str) -> Result<f64, CalcError>;
}
