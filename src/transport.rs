//! HTTP transport seam between the client and the network.

use crate::error::{ConfigError, Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// One HTTP exchange as the decoder sees it: status code and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends a single GET request. Every HTTP status comes back as a response;
/// only connection-level failures are errors. The service reports its own
/// failures in XML bodies, so non-200 statuses must reach the decoder.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, url: &str) -> Result<RawResponse>;
}

/// Production transport over a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with connect and request timeouts applied.
    pub fn new() -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, url: &str) -> Result<RawResponse> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!("Response: {} ({} bytes)", status, body.len());
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/onca/xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<ItemLookupResponse/>"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let response = transport
            .send(&format!("{}/onca/xml?ItemId=B000", server.uri()))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"<ItemLookupResponse/>");
    }

    #[tokio::test]
    async fn test_send_passes_error_status_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<Error/>"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let response = transport.send(&server.uri()).await.unwrap();

        // Service-level failures are response data, not transport errors.
        assert_eq!(response.status, 503);
        assert_eq!(response.body, b"<Error/>");
    }

    #[tokio::test]
    async fn test_send_connection_failure_is_error() {
        let transport = HttpTransport::new().unwrap();
        let result = transport.send("http://127.0.0.1:1/onca/xml").await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
