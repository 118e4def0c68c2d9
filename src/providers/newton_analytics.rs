use super::util::{build_url, fetch_text};
use crate::core::error::CalcError;
use crate::core::market::{BENCHMARK_INDEX, BETA_INTERVAL, BETA_OBSERVATIONS, BetaProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const PROVIDER_NAME: &str = "Newton Analytics";

/// Rolling 12-month beta against the S&P 500 from the Newton Analytics API.
pub struct NewtonBetaProvider {
    base_url: String,
    timeout: Duration,
}

impl NewtonBetaProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        NewtonBetaProvider {
            base_url: base_url.to_string(),
            timeout,
        }
    }
}

fn status_ok(status: &Value) -> bool {
    match status {
        Value::Null => true,
        Value::Number(n) => n.as_f64() == Some(200.0),
        Value::String(s) => {
            let s = s.trim();
            s == "200" || s.eq_ignore_ascii_case("ok") || s.eq_ignore_ascii_case("success")
        }
        Value::Bool(b) => *b,
        _ => false,
    }
}

/// Pulls the beta out of a decoded payload.
///
/// A `status` field signalling failure wins over a numeric `data` field.
fn extract_beta(payload: &Value) -> Result<f64, String> {
    let object = payload
        .as_object()
        .ok_or_else(|| "response is not a JSON object".to_string())?;

    if let Some(status) = object.get("status") {
        if !status_ok(status) {
            let detail = object
                .get("message")
                .and_then(Value::as_str)
                .map(|m| format!(": {m}"))
                .unwrap_or_default();
            return Err(format!("response status {status} indicates failure{detail}"));
        }
    }

    object
        .get("data")
        .and_then(Value::as_f64)
        .filter(|beta| beta.is_finite())
        .ok_or_else(|| "response missing numeric beta".to_string())
}

#[async_trait]
impl BetaProvider for NewtonBetaProvider {
    #[instrument(
        name = "NewtonBetaFetch",
        skip(self),
        fields(ticker = %ticker)
    )]
    async fn fetch_beta(&self, ticker: &str) -> Result<f64, CalcError> {
        let url = build_url(
            PROVIDER_NAME,
            ticker,
            &self.base_url,
            "/stock-beta/",
            &[
                ("ticker", ticker.to_string()),
                ("index", BENCHMARK_INDEX.to_string()),
                ("interval", BETA_INTERVAL.to_string()),
                ("observations", BETA_OBSERVATIONS.to_string()),
            ],
        )?;

        let text = fetch_text(PROVIDER_NAME, ticker, url, self.timeout).await?;

        let payload: Value = serde_json::from_str(&text).map_err(|e| {
            warn!(error = ?e, response = %text, "Failed to parse beta response");
            CalcError::upstream_data(PROVIDER_NAME, ticker, format!("Failed to parse JSON response: {e}"))
        })?;

        let beta = extract_beta(&payload).map_err(|message| {
            warn!(response = %text, "{}", message);
            CalcError::upstream_data(PROVIDER_NAME, ticker, message)
        })?;

        debug!(beta, "Received beta");
        Ok(beta)
    }
}
