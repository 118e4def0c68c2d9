use super::util::{build_url, fetch_text};
use crate::core::error::CalcError;
use crate::core::market::ReturnProvider;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const PROVIDER_NAME: &str = "Yahoo Finance";

/// Previous calendar year's total return from the Yahoo Finance chart API.
pub struct YahooReturnProvider {
    base_url: String,
    timeout: Duration,
    year: Option<i32>,
}

impl YahooReturnProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        YahooReturnProvider {
            base_url: base_url.to_string(),
            timeout,
            year: None,
        }
    }

    /// Pins the measured year instead of using the previous calendar year.
    pub fn for_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    fn measured_year(&self) -> i32 {
        self.year.unwrap_or_else(|| Utc::now().year() - 1)
    }
}

/// Unix timestamps of Jan 1 of `year` and of the following year, UTC.
fn year_bounds(year: i32) -> Option<(i64, i64)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)?.and_hms_opt(0, 0, 0)?;
    Some((start.and_utc().timestamp(), end.and_utc().timestamp()))
}

#[derive(Deserialize, Debug)]
struct YahooChartResponse {
    chart: ChartResult,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    result: Option<Vec<ChartItem>>,
    error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ChartItem {
    indicators: Option<Indicators>,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Deserialize, Debug)]
struct Quote {
    close: Option<Vec<Option<f64>>>,
}

#[derive(Deserialize, Debug)]
struct AdjClose {
    adjclose: Option<Vec<Option<f64>>>,
}

fn valid_prices(series: &[Option<f64>]) -> Vec<f64> {
    series
        .iter()
        .filter_map(|p| *p)
        .filter(|p| p.is_finite())
        .collect()
}

/// Return between the first and last valid price of the series.
fn period_return(prices: &[f64]) -> Result<f64, String> {
    let (first, last) = match (prices.first(), prices.last()) {
        (Some(first), Some(last)) if prices.len() >= 2 => (*first, *last),
        _ => return Err("not enough price data to compute a return".to_string()),
    };

    if first <= 0.0 {
        return Err(format!("invalid starting price {first}"));
    }

    let rate = last / first - 1.0;
    if rate.is_finite() {
        Ok(rate)
    } else {
        Err(format!("non-finite return from prices {first} and {last}"))
    }
}

fn extract_return(data: YahooChartResponse) -> Result<f64, String> {
    if let Some(error) = data.chart.error {
        return Err(format!(
            "{}: {}",
            error.code.unwrap_or_else(|| "error".to_string()),
            error.description.unwrap_or_default()
        ));
    }

    let indicators = data
        .chart
        .result
        .and_then(|items| items.into_iter().next())
        .and_then(|item| item.indicators)
        .ok_or_else(|| "no chart data in response".to_string())?;

    // Adjusted closes include distributions, which matter for funds.
    let adjusted = indicators
        .adjclose
        .first()
        .and_then(|a| a.adjclose.as_deref())
        .map(valid_prices)
        .filter(|prices| prices.len() >= 2);

    let prices = match adjusted {
        Some(prices) => prices,
        None => indicators
            .quote
            .first()
            .and_then(|q| q.close.as_deref())
            .map(valid_prices)
            .unwrap_or_default(),
    };

    period_return(&prices)
}

#[async_trait]
impl ReturnProvider for YahooReturnProvider {
    #[instrument(
        name = "YahooReturnFetch",
        skip(self),
        fields(ticker = %ticker)
    )]
    async fn fetch_expected_return(&self, ticker: &str) -> Result<f64, CalcError> {
        let year = self.measured_year();
        let (period1, period2) = year_bounds(year).ok_or_else(|| {
            CalcError::upstream_data(PROVIDER_NAME, ticker, format!("Invalid year: {year}"))
        })?;

        let url = build_url(
            PROVIDER_NAME,
            ticker,
            &self.base_url,
            &format!("/v8/finance/chart/{ticker}"),
            &[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
            ],
        )?;

        let text = fetch_text(PROVIDER_NAME, ticker, url, self.timeout).await?;

        let data: YahooChartResponse = serde_json::from_str(&text).map_err(|e| {
            warn!(error = ?e, response = %text, "Failed to parse chart response");
            CalcError::upstream_data(PROVIDER_NAME, ticker, format!("Failed to parse JSON response: {e}"))
        })?;

        let rate = extract_return(data).map_err(|message| {
            warn!("{}", message);
            CalcError::upstream_data(PROVIDER_NAME, ticker, message)
        })?;

        debug!(year, rate, "Computed annual return");
        Ok(rate)
    }
}
