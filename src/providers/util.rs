use crate::core::error::CalcError;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = "mfv/1.0";

/// Builds `{base_url}{path}?{params}`, mapping a malformed base URL to an
/// unavailable provider.
pub fn build_url(
    provider: &'static str,
    ticker: &str,
    base_url: &str,
    path: &str,
    params: &[(&str, String)],
) -> Result<Url, CalcError> {
    let raw = format!("{}{}", base_url.trim_end_matches('/'), path);
    Url::parse_with_params(&raw, params).map_err(|e| {
        CalcError::upstream_unavailable(provider, ticker, format!("Invalid URL {raw}: {e}"))
    })
}

/// Issues a single GET with a bounded timeout and returns the response body.
///
/// Anything short of a successful response with a readable body is reported
/// as [`CalcError::UpstreamUnavailable`]; decoding the body is left to the
/// caller. There is no retry.
pub async fn fetch_text(
    provider: &'static str,
    ticker: &str,
    url: Url,
    timeout: Duration,
) -> Result<String, CalcError> {
    let unavailable = |message: String| CalcError::upstream_unavailable(provider, ticker, message);

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| unavailable(format!("Failed to build HTTP client: {e}")))?;

    debug!("Requesting {} data from {}", provider, url);
    let response = client.get(url.clone()).send().await.map_err(|e| {
        warn!(error = %e, "{} request failed", provider);
        if e.is_timeout() {
            unavailable(format!("Request timed out after {}s", timeout.as_secs_f64()))
        } else {
            unavailable(format!("Request error: {e} URL: {url}"))
        }
    })?;

    debug!(response = ?response, "Received {} response", provider);

    let status = response.status();
    if !status.is_success() {
        return Err(unavailable(format!("HTTP error: {status}")));
    }

    response.text().await.map_err(|e| {
        if e.is_timeout() {
            unavailable(format!("Request timed out after {}s", timeout.as_secs_f64()))
        } else {
            unavailable(format!("Failed to read response body: {e}"))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_build_url_encodes_params() {
        let url = build_url(
            "Test",
            "VFIAX",
            "https://example.com/",
            "/stock-beta/",
            &[("ticker", "VFIAX".to_string()), ("index", "^GSPC".to_string())],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/stock-beta/?ticker=VFIAX&index=%5EGSPC"
        );
    }

    #[test]
    fn test_build_url_invalid_base() {
        let err = build_url("Test", "VFIAX", "not a url", "/x", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
    }

    #[tokio::test]
    async fn test_fetch_text_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .and(query_param("ticker", "VFIAX"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&mock_server)
            .await;

        let url = build_url(
            "Test",
            "VFIAX",
            &mock_server.uri(),
            "/data",
            &[("ticker", "VFIAX".to_string())],
        )
        .unwrap();
        let body = fetch_text("Test", "VFIAX", url, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn test_fetch_text_http_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let url = build_url("Test", "VFIAX", &mock_server.uri(), "/data", &[]).unwrap();
        let err = fetch_text("Test", "VFIAX", url, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
        assert_eq!(
            err.to_string(),
            "Test is unavailable for ticker VFIAX: HTTP error: 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_fetch_text_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let url = build_url("Test", "VFIAX", &mock_server.uri(), "/data", &[]).unwrap();
        let err = fetch_text("Test", "VFIAX", url, Duration::from_millis(50))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
        assert!(err.to_string().contains("timed out"));
    }
}
