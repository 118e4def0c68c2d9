//! The closed list of funds the calculator supports.

use crate::core::error::CalcError;
use anyhow::{Result, bail};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fund {
    pub name: String,
    pub ticker: String,
}

impl Fund {
    pub fn new(name: &str, ticker: &str) -> Self {
        Fund {
            name: name.to_string(),
            ticker: ticker.to_string(),
        }
    }
}

const STANDARD_FUNDS: [(&str, &str); 25] = [
    ("Vanguard Total Stock Market Index Fund;Institutional Plus", "VSMPX"),
    ("Fidelity 500 Index Fund", "FXAIX"),
    ("Vanguard 500 Index Fund;Admiral", "VFIAX"),
    ("Vanguard Total Stock Market Index Fund;Admiral", "VTSAX"),
    ("Vanguard Total International Stock Index Fund;Investor", "VGTSX"),
    ("Fidelity Strategic Advisers Fidelity US Total Stk", "FCTDX"),
    ("Vanguard Institutional Index Fund;Inst Plus", "VIIIX"),
    ("Vanguard Total Bond Market II Index Fund;Institutional", "VTBNX"),
    ("American Funds Growth Fund of America;A", "AGTHX"),
    ("Vanguard Total Bond Market II Index Fund;Investor", "VTBIX"),
    ("Fidelity Contrafund", "FCNTX"),
    ("PIMCO Income Fund;Institutional", "PIMIX"),
    ("T. Rowe Price Blue Chip Growth Fund", "TRBCX"),
    ("Dodge & Cox Stock Fund", "DODGX"),
    ("Dodge & Cox International Stock Fund", "DODFX"),
    ("Vanguard Wellington Fund;Investor", "VWELX"),
    ("Vanguard US Growth Fund;Investor", "VWUSX"),
    ("Vanguard Dividend Growth Fund;Investor", "VDIGX"),
    ("Vanguard Health Care Fund;Investor", "VGHCX"),
    ("Vanguard PRIMECAP Core Fund;Investor", "VPCCX"),
    ("Legg Mason ClearBridge Large Cap Growth Fund", "LMGTX"),
    ("PIMCO Income Fund;A", "PONAX"),
    ("Templeton Global Bond Fund;A", "TPINX"),
    ("Invesco Gold & Special Minerals Fund;A", "OPGSX"),
    ("American Funds Capital Income Builder;A", "CAIBX"),
];

/// Immutable, ordered registry of supported funds.
///
/// Built once at startup and shared read-only with the engine. Tickers are
/// unique ignoring case.
#[derive(Debug, Clone)]
pub struct FundCatalog {
    funds: Vec<Fund>,
}

impl FundCatalog {
    pub fn new(funds: Vec<Fund>) -> Result<Self> {
        if funds.is_empty() {
            bail!("Fund catalog must contain at least one fund");
        }

        let mut seen = HashSet::new();
        for fund in &funds {
            if !seen.insert(fund.ticker.to_uppercase()) {
                bail!("Duplicate ticker in fund catalog: {}", fund.ticker);
            }
        }

        Ok(FundCatalog { funds })
    }

    /// The built-in list of equity and bond funds.
    pub fn standard() -> Self {
        FundCatalog {
            funds: STANDARD_FUNDS
                .iter()
                .map(|(name, ticker)| Fund::new(name, ticker))
                .collect(),
        }
    }

    pub fn list_funds(&self) -> &[Fund] {
        &self.funds
    }

    pub fn find(&self, ticker: &str) -> Option<&Fund> {
        self.funds
            .iter()
            .find(|f| f.ticker.eq_ignore_ascii_case(ticker))
    }

    pub fn validate(&self, ticker: &str) -> Result<(), CalcError> {
        self.find(ticker)
            .map(|_| ())
            .ok_or_else(|| CalcError::unknown_ticker(ticker))
    }
}

impl Default for FundCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    #[test]
    fn test_standard_catalog_order() {
        let catalog = FundCatalog::standard();
        let funds = catalog.list_funds();
        assert_eq!(funds.len(), 25);
        assert_eq!(funds[0].ticker, "VSMPX");
        assert_eq!(funds[2].ticker, "VFIAX");
        assert_eq!(funds[24].ticker, "CAIBX");
        assert_eq!(funds[13].name, "Dodge & Cox Stock Fund");
    }

    #[test]
    fn test_standard_catalog_has_unique_tickers() {
        let catalog = FundCatalog::standard();
        assert!(FundCatalog::new(catalog.list_funds().to_vec()).is_ok());
    }

    #[test]
    fn test_validate_is_case_insensitive() {
        let catalog = FundCatalog::standard();
        assert!(catalog.validate("VFIAX").is_ok());
        assert!(catalog.validate("vfiax").is_ok());
        assert!(catalog.validate("VfIaX").is_ok());
        assert_eq!(catalog.find("fxaix").unwrap().ticker, "FXAIX");
    }

    #[test]
    fn test_validate_unknown_ticker() {
        let catalog = FundCatalog::standard();
        let err = catalog.validate("ZZZZ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.ticker(), Some("ZZZZ"));
        assert!(err.to_string().contains("ZZZZ"));
    }

    #[test]
    fn test_new_rejects_duplicates_ignoring_case() {
        let result = FundCatalog::new(vec![
            Fund::new("Fund A", "AAAAX"),
            Fund::new("Fund A again", "aaaax"),
        ]);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Duplicate ticker")
        );
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(FundCatalog::new(Vec::new()).is_err());
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = FundCatalog::new(vec![Fund::new("Test Fund", "TESTX")]).unwrap();
        assert!(catalog.validate("testx").is_ok());
        assert!(catalog.validate("VFIAX").is_err());
    }
}
