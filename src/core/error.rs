//! Failure taxonomy shared by the engine and the market data providers.

use thiserror::Error;

/// Generic message shown for upstream failures.
pub const DATA_UNAVAILABLE_MESSAGE: &str =
    "Market data is currently unavailable for this fund. Please try again later.";

/// Fieldless discriminant of [`CalcError`] for callers that only branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    UpstreamData,
    UpstreamUnavailable,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Caller input was rejected before any network activity.
    #[error("{message}")]
    Validation {
        ticker: Option<String>,
        message: String,
    },

    /// A provider answered, but the payload did not carry the expected number.
    #[error("{provider} returned unusable data for ticker {ticker}: {message}")]
    UpstreamData {
        provider: &'static str,
        ticker: String,
        message: String,
    },

    /// A provider could not be reached, timed out, or refused the request.
    #[error("{provider} is unavailable for ticker {ticker}: {message}")]
    UpstreamUnavailable {
        provider: &'static str,
        ticker: String,
        message: String,
    },
}

impl CalcError {
    pub fn validation(message: impl Into<String>) -> Self {
        CalcError::Validation {
            ticker: None,
            message: message.into(),
        }
    }

    pub fn validation_for(ticker: &str, message: impl Into<String>) -> Self {
        CalcError::Validation {
            ticker: Some(ticker.to_string()),
            message: message.into(),
        }
    }

    pub fn unknown_ticker(ticker: &str) -> Self {
        CalcError::Validation {
            ticker: Some(ticker.to_string()),
            message: format!("Ticker not found in supported fund list: {ticker}"),
        }
    }

    pub fn upstream_data(provider: &'static str, ticker: &str, message: impl Into<String>) -> Self {
        CalcError::UpstreamData {
            provider,
            ticker: ticker.to_string(),
            message: message.into(),
        }
    }

    pub fn upstream_unavailable(
        provider: &'static str,
        ticker: &str,
        message: impl Into<String>,
    ) -> Self {
        CalcError::UpstreamUnavailable {
            provider,
            ticker: ticker.to_string(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::Validation { .. } => ErrorKind::Validation,
            CalcError::UpstreamData { .. } => ErrorKind::UpstreamData,
            CalcError::UpstreamUnavailable { .. } => ErrorKind::UpstreamUnavailable,
        }
    }

    pub fn ticker(&self) -> Option<&str> {
        match self {
            CalcError::Validation { ticker, .. } => ticker.as_deref(),
            CalcError::UpstreamData { ticker, .. } | CalcError::UpstreamUnavailable { ticker, .. } => {
                Some(ticker)
            }
        }
    }

    /// Message suitable for end users: validation text verbatim, a generic
    /// notice for anything upstream.
    pub fn user_message(&self) -> String {
        match self {
            CalcError::Validation { message, .. } => message.clone(),
            _ => DATA_UNAVAILABLE_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_ticker() {
        let err = CalcError::unknown_ticker("ZZZZ");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.ticker(), Some("ZZZZ"));
        assert_eq!(
            err.to_string(),
            "Ticker not found in supported fund list: ZZZZ"
        );

        let err = CalcError::upstream_data("Newton Analytics", "VFIAX", "missing numeric beta");
        assert_eq!(err.kind(), ErrorKind::UpstreamData);
        assert_eq!(err.ticker(), Some("VFIAX"));

        let err = CalcError::upstream_unavailable("Yahoo Finance", "VFIAX", "timed out");
        assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
        assert_eq!(
            err.to_string(),
            "Yahoo Finance is unavailable for ticker VFIAX: timed out"
        );
    }

    #[test]
    fn test_user_message() {
        let err = CalcError::validation("Principal must be a positive number");
        assert_eq!(err.user_message(), "Principal must be a positive number");
        assert_eq!(err.ticker(), None);

        let err = CalcError::validation_for("VFIAX", "Years must be a positive number");
        assert_eq!(err.user_message(), "Years must be a positive number");
        assert_eq!(err.ticker(), Some("VFIAX"));

        let err = CalcError::upstream_data("Newton Analytics", "VFIAX", "bad payload");
        assert_eq!(err.user_message(), DATA_UNAVAILABLE_MESSAGE);
        let err = CalcError::upstream_unavailable("Newton Analytics", "VFIAX", "refused");
        assert_eq!(err.user_message(), DATA_UNAVAILABLE_MESSAGE);
    }
}
