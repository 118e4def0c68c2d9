use super::ui;
use crate::core::{CalculationResult, CapmEngine, GrowthPoint};
use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculationOutput<'a> {
    #[serde(flatten)]
    result: &'a CalculationResult,
    growth: Vec<GrowthPoint>,
}

pub fn render_json(result: &CalculationResult) -> Result<String> {
    let output = CalculationOutput {
        result,
        growth: result.growth_projection(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

pub fn render_result(result: &CalculationResult, fund_name: Option<&str>) -> String {
    let mut output = format!(
        "Fund: {}\n\n",
        ui::style_text(fund_name.unwrap_or(&result.ticker), ui::StyleType::Title)
    );

    output.push_str(&format!(
        "{}: {}\n\n",
        ui::style_text("Estimated Future Value", ui::StyleType::Label),
        ui::style_text(&ui::format_currency(result.future_value), ui::StyleType::Highlight)
    ));

    let mut metrics = ui::new_styled_table();
    metrics.set_header(vec![ui::header_cell("Metric"), ui::header_cell("Value")]);
    metrics.add_row(vec![
        Cell::new("Ticker"),
        ui::number_cell(result.ticker.clone()),
    ]);
    metrics.add_row(vec![
        Cell::new("Principal"),
        ui::number_cell(ui::format_currency(result.principal)),
    ]);
    metrics.add_row(vec![
        Cell::new("Years"),
        ui::number_cell(format!("{}", result.years)),
    ]);
    metrics.add_row(vec![
        Cell::new("Beta"),
        ui::number_cell(format!("{:.4}", result.beta)),
    ]);
    metrics.add_row(vec![
        Cell::new("Expected Return"),
        ui::number_cell(ui::format_percent(result.expected_return_rate)),
    ]);
    metrics.add_row(vec![
        Cell::new("Risk-Free Rate"),
        ui::number_cell(ui::format_percent(result.risk_free_rate)),
    ]);
    metrics.add_row(vec![
        Cell::new("CAPM Rate"),
        ui::number_cell(ui::format_percent(result.capm_rate)),
    ]);
    output.push_str(&metrics.to_string());

    let mut growth = ui::new_styled_table();
    growth.set_header(vec![ui::header_cell("Year"), ui::header_cell("Value")]);
    for point in result.growth_projection() {
        growth.add_row(vec![
            ui::number_cell(format!("{}", point.year)),
            ui::number_cell(ui::format_currency(point.value)),
        ]);
    }
    output.push_str(&format!(
        "\n\n{}\n{}",
        ui::style_text("Projected Growth", ui::StyleType::Label),
        growth
    ));

    output.push_str(&format!(
        "\n\n{}",
        ui::style_text(
            "Model: r = rf + β (Rm − rf), FV = P · e^(r · t)",
            ui::StyleType::Subtle
        )
    ));

    output
}

pub async fn run(
    engine: &CapmEngine,
    ticker: &str,
    principal: f64,
    years: f64,
    json: bool,
) -> Result<()> {
    info!(ticker, principal, years, "Calculating future value");

    let pb = ui::new_spinner("Fetching market data...");
    let outcome = engine.calculate(ticker, principal, years).await;
    pb.finish_and_clear();

    let result = outcome?;
    if json {
        println!("{}", render_json(&result)?);
    } else {
        let fund_name = engine.catalog().find(&result.ticker).map(|f| f.name.as_str());
        println!("{}", render_result(&result, fund_name));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BetaProvider, CalcError, ErrorKind, FundCatalog, ReturnProvider};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FixedBeta(f64);

    #[async_trait]
    impl BetaProvider for FixedBeta {
        async fn fetch_beta(&self, _ticker: &str) -> Result<f64, CalcError> {
            Ok(self.0)
        }
    }

    struct FixedReturn(f64);

    #[async_trait]
    impl ReturnProvider for FixedReturn {
        async fn fetch_expected_return(&self, _ticker: &str) -> Result<f64, CalcError> {
            Ok(self.0)
        }
    }

    fn sample_result() -> CalculationResult {
        CalculationResult {
            ticker: "VFIAX".to_string(),
            principal: 10000.0,
            years: 5.0,
            beta: 1.05,
            expected_return_rate: 0.10,
            risk_free_rate: 0.0425,
            capm_rate: 0.102875,
            future_value: 16725.928,
        }
    }

    #[test]
    fn test_render_result() {
        let output = render_result(&sample_result(), Some("Vanguard 500 Index Fund;Admiral"));
        assert!(output.contains("Vanguard 500 Index Fund;Admiral"));
        assert!(output.contains("$16,725.93"));
        assert!(output.contains("1.0500"));
        assert!(output.contains("10.00%"));
        assert!(output.contains("4.25%"));
        assert!(output.contains("10.29%"));
        assert!(output.contains("$11,083.53"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ticker"], "VFIAX");
        assert_eq!(value["capmRate"], 0.102875);
        assert_eq!(value["riskFreeRate"], 0.0425);
        assert_eq!(value["growth"].as_array().unwrap().len(), 6);
        assert_eq!(value["growth"][5]["value"], 16725.93);
    }

    #[tokio::test]
    async fn test_run_success() {
        let engine = CapmEngine::new(
            Arc::new(FundCatalog::standard()),
            Arc::new(FixedBeta(1.05)),
            Arc::new(FixedReturn(0.10)),
        );
        assert!(run(&engine, "VFIAX", 10000.0, 5.0, false).await.is_ok());
        assert!(run(&engine, "vfiax", 10000.0, 5.0, true).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_surfaces_calc_error() {
        let engine = CapmEngine::new(
            Arc::new(FundCatalog::standard()),
            Arc::new(FixedBeta(1.05)),
            Arc::new(FixedReturn(0.10)),
        );
        let err = run(&engine, "ZZZZ", 10000.0, 5.0, false).await.unwrap_err();
        let calc_err = err.downcast_ref::<CalcError>().unwrap();
        assert_eq!(calc_err.kind(), ErrorKind::Validation);
    }
}
