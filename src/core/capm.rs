//! CAPM rate and continuous-compounding projection.
//!
//! [`CapmEngine::calculate`] is the single entry point presentation layers
//! call. It validates input against the [`FundCatalog`], fetches beta and
//! expected return concurrently, and returns every intermediate figure so the
//! caller can render an auditable breakdown.
use crate::core::catalog::FundCatalog;
use crate::core::error::CalcError;
use crate::core::market::{BetaProvider, ReturnProvider};
use futures::future::try_join;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Proxy for the 10-year US Treasury yield.
pub const RISK_FREE_RATE: f64 = 0.0425;

/// Longest horizon, in years, the engine projects.
pub const MAX_YEARS: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub ticker: String,
    pub principal: f64,
    pub years: f64,
    pub beta: f64,
    pub expected_return_rate: f64,
    pub risk_free_rate: f64,
    pub capm_rate: f64,
    pub future_value: f64,
}

impl CalculationResult {
    pub fn growth_projection(&self) -> Vec<GrowthPoint> {
        growth_projection(self.principal, self.capm_rate, self.years)
    }
}

/// Projected value at a point in time, rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthPoint {
    pub year: f64,
    pub value: f64,
}

/// `rf + beta * (expected - rf)`
pub fn capm_rate(risk_free_rate: f64, beta: f64, expected_return_rate: f64) -> f64 {
    risk_free_rate + beta * (expected_return_rate - risk_free_rate)
}

/// `principal * e^(rate * years)`
pub fn future_value(principal: f64, rate: f64, years: f64) -> f64 {
    principal * (rate * years).exp()
}

/// Value at every whole year from 0 up to `years`, plus `years` itself when
/// it is fractional. Empty for horizons outside `0..=MAX_YEARS`.
pub fn growth_projection(principal: f64, rate: f64, years: f64) -> Vec<GrowthPoint> {
    if !(years.is_finite() && (0.0..=MAX_YEARS).contains(&years)) {
        return Vec::new();
    }

    let round_cents = |v: f64| (v * 100.0).round() / 100.0;
    let whole_years = years.floor() as u64;

    let mut points: Vec<GrowthPoint> = (0..=whole_years)
        .map(|y| {
            let year = y as f64;
            GrowthPoint {
                year,
                value: round_cents(future_value(principal, rate, year)),
            }
        })
        .collect();

    if years.fract() > 0.0 {
        points.push(GrowthPoint {
            year: years,
            value: round_cents(future_value(principal, rate, years)),
        });
    }

    points
}

fn ensure_positive(ticker: &str, label: &str, value: f64) -> Result<(), CalcError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::validation_for(
            ticker,
            format!("{label} must be a positive number, got {value}"),
        ))
    }
}

fn ensure_horizon(ticker: &str, years: f64) -> Result<(), CalcError> {
    ensure_positive(ticker, "Years", years)?;
    if years > MAX_YEARS {
        return Err(CalcError::validation_for(
            ticker,
            format!("Years must be at most {MAX_YEARS}, got {years}"),
        ));
    }
    Ok(())
}

/// Stateless orchestrator; safe to share across concurrent requests.
#[derive(Clone)]
pub struct CapmEngine {
    catalog: Arc<FundCatalog>,
    beta_provider: Arc<dyn BetaProvider>,
    return_provider: Arc<dyn ReturnProvider>,
    risk_free_rate: f64,
}

impl CapmEngine {
    pub fn new(
        catalog: Arc<FundCatalog>,
        beta_provider: Arc<dyn BetaProvider>,
        return_provider: Arc<dyn ReturnProvider>,
    ) -> Self {
        CapmEngine {
            catalog,
            beta_provider,
            return_provider,
            risk_free_rate: RISK_FREE_RATE,
        }
    }

    pub fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    pub fn catalog(&self) -> &FundCatalog {
        &self.catalog
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Validates the request, then fetches beta and expected return
    /// concurrently. The first provider failure wins; the other fetch is
    /// dropped along with the returned future.
    #[instrument(name = "CapmCalculate", skip(self), fields(ticker = %ticker))]
    pub async fn calculate(
        &self,
        ticker: &str,
        principal: f64,
        years: f64,
    ) -> Result<CalculationResult, CalcError> {
        let ticker = ticker.trim();
        self.catalog.validate(ticker)?;
        let ticker = self
            .catalog
            .find(ticker)
            .map_or_else(|| ticker.to_uppercase(), |fund| fund.ticker.clone());

        ensure_positive(&ticker, "Principal", principal)?;
        ensure_horizon(&ticker, years)?;

        debug!("Fetching beta and expected return for {}", ticker);
        let (beta, expected_return_rate) = try_join(
            self.beta_provider.fetch_beta(&ticker),
            self.return_provider.fetch_expected_return(&ticker),
        )
        .await?;

        let capm_rate = capm_rate(self.risk_free_rate, beta, expected_return_rate);
        let future_value = future_value(principal, capm_rate, years);
        info!(beta, expected_return_rate, capm_rate, future_value, "Calculated projection");

        Ok(CalculationResult {
            ticker,
            principal,
            years,
            beta,
            expected_return_rate,
            risk_free_rate: self.risk_free_rate,
            capm_rate,
            future_value,
        })
    }
}
