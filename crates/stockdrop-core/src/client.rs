use std::sync::Arc;

use serde_json::Value;

use crate::config::ApiConfig;
use crate::endpoint::{EndpointSpec, ScreenerQuery};
use crate::http_client::{HttpClient, HttpRequest, HttpResponse};
use crate::{FetchError, Symbol};

/// Fixed quote the placeholder endpoint always answers with.
pub const DEMO_PRICE: f64 = 2_385.40;

/// Issues one upstream GET per call and classifies the outcome.
///
/// This layer never retries; retry and fallback policy live in the
/// resolver above it.
#[derive(Clone)]
pub struct QuoteClient {
    http: Arc<dyn HttpClient>,
    config: ApiConfig,
}

impl QuoteClient {
    pub fn new(http: Arc<dyn HttpClient>, config: ApiConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fetch the raw JSON payload for one endpoint variant.
    ///
    /// Status classification follows the error taxonomy: 429 is
    /// `RateLimited`, 401/403 is `Auth`, any other non-2xx is `Upstream`,
    /// transport failures are `Network`, and a 2xx body that is not JSON
    /// is `Parse`. The placeholder variant synthesizes its payload
    /// locally and cannot fail.
    pub async fn fetch(
        &self,
        spec: &EndpointSpec,
        symbol: &Symbol,
    ) -> Result<Value, FetchError> {
        let Some(url) = spec.url(&self.config.base_url, symbol, &self.config.api_key) else {
            return Ok(demo_payload(symbol));
        };

        let request = HttpRequest::get(url).with_timeout_ms(as_millis(spec.timeout));
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|error| FetchError::network(error.message()))?;

        classify(response)
    }

    /// Fetch the raw screener result array for a ranking batch.
    pub async fn fetch_screener(&self, query: &ScreenerQuery) -> Result<Value, FetchError> {
        let url = query.url(&self.config.base_url, &self.config.api_key);
        let request = HttpRequest::get(url).with_timeout_ms(as_millis(query.timeout));
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|error| FetchError::network(error.message()))?;

        classify(response)
    }
}

/// Payload the placeholder endpoint yields: a flat gold quote with no
/// movement, shaped for the placeholder normalizer.
pub fn demo_payload(symbol: &Symbol) -> Value {
    serde_json::json!({
        "symbol": symbol.as_str(),
        "price": DEMO_PRICE,
        "change": 0.0,
        "changePercent": 0.0,
    })
}

fn classify(response: HttpResponse) -> Result<Value, FetchError> {
    if response.status == 429 {
        return Err(FetchError::rate_limited("upstream returned status 429"));
    }
    if matches!(response.status, 401 | 403) {
        return Err(FetchError::auth(format!(
            "upstream rejected credentials with status {}",
            response.status
        )));
    }
    if !response.is_success() {
        return Err(FetchError::upstream(format!(
            "upstream returned status {}",
            response.status
        )));
    }

    serde_json::from_str(&response.body)
        .map_err(|error| FetchError::parse(format!("malformed upstream JSON: {error}")))
}

fn as_millis(timeout: std::time::Duration) -> u64 {
    timeout.as_millis().min(u128::from(u64::MAX)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FetchErrorKind;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: String::from(body),
        }
    }

    #[test]
    fn classifies_rate_limit() {
        let error = classify(response(429, "")).expect_err("must fail");
        assert_eq!(error.kind(), FetchErrorKind::RateLimited);
    }

    #[test]
    fn classifies_auth_failures() {
        for status in [401, 403] {
            let error = classify(response(status, "")).expect_err("must fail");
            assert_eq!(error.kind(), FetchErrorKind::Auth);
        }
    }

    #[test]
    fn classifies_other_non_2xx_as_upstream() {
        for status in [404, 500, 503] {
            let error = classify(response(status, "")).expect_err("must fail");
            assert_eq!(error.kind(), FetchErrorKind::Upstream);
        }
    }

    #[test]
    fn classifies_bad_json_as_parse() {
        let error = classify(response(200, "<html>maintenance</html>")).expect_err("must fail");
        assert_eq!(error.kind(), FetchErrorKind::Parse);
    }

    #[test]
    fn passes_valid_json_through() {
        let value = classify(response(200, r#"[{"price": 1.0}]"#)).expect("must parse");
        assert!(value.is_array());
    }
}
