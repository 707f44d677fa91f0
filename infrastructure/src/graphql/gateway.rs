//! reqwest implementation of [`GraphQlGateway`].

use async_trait::async_trait;
use biznisweb_application::ports::graphql_gateway::{GatewayError, GraphQlGateway};
use biznisweb_domain::util::truncate_str;
use biznisweb_domain::{GraphQlResponse, UpstreamRequest};
use std::time::{Duration, Instant};
use tracing::debug;

/// Authentication header; the value is `Token <token>`.
pub const API_KEY_HEADER: &str = "BW-API-Key";

/// Gateway that POSTs `{ query, variables }` as JSON.
///
/// The timeout bounds the whole request, body included. One `execute` is
/// exactly one HTTP request.
pub struct HttpGraphQlGateway {
    client: reqwest::Client,
    url: String,
    token: String,
    timeout: Duration,
}

impl HttpGraphQlGateway {
    pub fn new(
        url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("biznisweb-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::ConnectionError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            token: token.into(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.timeout)
        } else if err.is_decode() {
            GatewayError::InvalidResponse(err.to_string())
        } else {
            GatewayError::ConnectionError(err.to_string())
        }
    }
}

#[async_trait]
impl GraphQlGateway for HttpGraphQlGateway {
    async fn execute(&self, request: &UpstreamRequest) -> Result<GraphQlResponse, GatewayError> {
        let start = Instant::now();

        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, format!("Token {}", self.token))
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream responded"
        );

        let envelope = serde_json::from_str::<GraphQlResponse>(&body);

        if !status.is_success() {
            // a 4xx may still carry a regular envelope
            return match envelope {
                Ok(envelope) if envelope.has_errors() => Ok(envelope),
                _ => Err(GatewayError::HttpStatus {
                    status: status.as_u16(),
                    message: truncate_str(body.trim(), 200).to_string(),
                }),
            };
        }

        envelope.map_err(|e| GatewayError::InvalidResponse(format!("Not a GraphQL envelope: {}", e)))
    }
}
