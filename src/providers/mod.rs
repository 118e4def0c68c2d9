pub mod newton_analytics;
pub mod util;
pub mod yahoo_finance;

pub use newton_analytics::NewtonBetaProvider;
pub use yahoo_finance::YahooReturnProvider;
