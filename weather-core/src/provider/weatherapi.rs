use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, info};

use crate::{
    error::{Result, WeatherError},
    model::{ProviderErrorBody, WeatherReport},
};

use super::WeatherProvider;

pub const CURRENT_ENDPOINT: &str = "http://api.weatherapi.com/v1/current.json";

/// Client for the WeatherAPI.com `current.json` endpoint.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, CURRENT_ENDPOINT)
    }

    pub fn with_endpoint(api_key: String, endpoint: impl Into<String>) -> Self {
        Self { api_key, endpoint: endpoint.into(), http: Client::new() }
    }

    /// Full request URL, `<endpoint>?key=<api key>&q=<location>`.
    pub fn request_url(&self, location: &str) -> Result<Url> {
        let request = self
            .http
            .get(&self.endpoint)
            .query(&[("key", self.api_key.as_str()), ("q", location)])
            .build()
            .map_err(WeatherError::request)?;

        Ok(request.url().clone())
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current(&self, location: &str) -> Result<WeatherReport> {
        let url = self.request_url(location)?;
        info!(endpoint = %self.endpoint, location, "requesting current weather");

        let res = self.http.get(url).send().await.map_err(WeatherError::request)?;

        // Non-2xx bodies still go through the decoder; provider error
        // payloads surface as decode failures.
        let status = res.status();
        let body = res.bytes().await.map_err(WeatherError::request)?;
        debug!(%status, bytes = body.len(), "received WeatherAPI.com response");

        serde_json::from_slice(&body).map_err(|source| WeatherError::Decode {
            status: status.as_u16(),
            detail: failure_detail(status, &body),
            source,
        })
    }
}

fn failure_detail(status: StatusCode, body: &[u8]) -> Option<String> {
    if let Ok(payload) = serde_json::from_slice::<ProviderErrorBody>(body) {
        return Some(format!("{} (code {})", payload.error.message, payload.error.code));
    }

    if status.is_success() {
        None
    } else {
        Some(truncate_body(&String::from_utf8_lossy(body)))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::test_server::serve;
    use super::*;
    use crate::model::fixtures;

    #[test]
    fn request_url_carries_key_and_location() {
        let provider = WeatherApiProvider::new("abc123".to_string());
        let url = provider.request_url("Paris").unwrap();

        assert_eq!(url.as_str(), "http://api.weatherapi.com/v1/current.json?key=abc123&q=Paris");
    }

    #[test]
    fn request_url_escapes_location() {
        let provider = WeatherApiProvider::new("abc123".to_string());
        let url = provider.request_url("New York").unwrap();

        assert_eq!(url.query(), Some("key=abc123&q=New+York"));
    }

    #[tokio::test]
    async fn fetches_and_decodes_with_a_single_request() {
        let server = serve("200 OK", fixtures::PARIS).await;
        let provider = WeatherApiProvider::with_endpoint("abc123".to_string(), &server.endpoint);

        let report = provider.current("Paris").await.unwrap();

        assert_eq!(report.location.name, "Paris");
        assert_eq!(report.current.condition.text, "Partly cloudy");

        let requests = server.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0], "GET /v1/current.json?key=abc123&q=Paris HTTP/1.1");
    }

    #[tokio::test]
    async fn provider_error_payload_is_a_decode_failure() {
        let server = serve("400 Bad Request", fixtures::NO_MATCH).await;
        let provider = WeatherApiProvider::with_endpoint("abc123".to_string(), &server.endpoint);

        let err = provider.current("Nowhere").await.unwrap_err();

        match &err {
            WeatherError::Decode { status, detail, .. } => {
                assert_eq!(*status, 400);
                assert_eq!(detail.as_deref(), Some("No matching location found. (code 1006)"));
            }
            other => panic!("expected decode error, got {other:?}"),
        }
        assert!(err.to_string().contains("No matching location found."));
        assert_eq!(server.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_failure() {
        let server = serve("200 OK", r#"{"location": {"name": "Paris""#).await;
        let provider = WeatherApiProvider::with_endpoint("abc123".to_string(), &server.endpoint);

        let err = provider.current("Paris").await.unwrap_err();

        assert!(matches!(err, WeatherError::Decode { status: 200, detail: None, .. }));
    }

    #[tokio::test]
    async fn non_json_error_page_keeps_body_excerpt() {
        let server = serve("502 Bad Gateway", "upstream unavailable").await;
        let provider = WeatherApiProvider::with_endpoint("abc123".to_string(), &server.endpoint);

        let err = provider.current("Paris").await.unwrap_err();

        match err {
            WeatherError::Decode { status, detail, .. } => {
                assert_eq!(status, 502);
                assert_eq!(detail.as_deref(), Some("upstream unavailable"));
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_is_a_request_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = WeatherApiProvider::with_endpoint(
            "abc123".to_string(),
            format!("http://{addr}/v1/current.json"),
        );

        let err = provider.current("Paris").await.unwrap_err();

        assert!(matches!(err, WeatherError::Request(_)));
    }

    #[tokio::test]
    async fn request_failure_does_not_reveal_api_key() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = WeatherApiProvider::with_endpoint(
            "SECRET_KEY_123".to_string(),
            format!("http://{addr}/v1/current.json"),
        );

        let err = provider.current("Paris").await.unwrap_err();
        let chain = format!("{:?}", anyhow::Error::from(err));

        assert!(chain.contains("Failed to request current weather"));
        assert!(!chain.contains("SECRET_KEY_123"), "api key in error chain: {chain}");
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(500);
        let out = truncate_body(&body);

        assert_eq!(out.len(), 203);
        assert!(out.ends_with("..."));
    }
}
