//! Core business logic abstractions

pub mod capm;
pub mod catalog;
pub mod config;
pub mod error;
pub mod log;
pub mod market;

// Re-export main types for cleaner imports
pub use capm::{CalculationResult, CapmEngine, GrowthPoint, MAX_YEARS, RISK_FREE_RATE};
pub use catalog::{Fund, FundCatalog};
pub use error::{CalcError, ErrorKind};
pub use market::{BetaProvider, ReturnProvider};
