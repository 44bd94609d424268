//! HTTP client for the remote payment REST API.
//!
//! One owned client per gateway instance: credentials and environment
//! are fixed at construction and never change afterwards. OAuth2 token
//! management is internal: callers only see one remote operation per
//! request, with the bearer token fetched and refreshed behind the
//! scenes, the way the processor's own SDKs hide it.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::config::{Environment, GatewayConfig};
use crate::error::{GatewayError, Result};

/// Default HTTP client with connection pooling enabled.
///
/// Shared across gateway instances so connection pooling survives
/// constructing more than one adapter.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(10)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create default HTTP client")
});

/// Tokens are refreshed this long before their reported expiry.
const TOKEN_EXPIRY_SLACK: Duration = Duration::from_secs(60);

/// Owned remote-API client: environment, credentials, token cache.
pub struct PaypalClient {
    http: Client,
    environment: Environment,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<CachedToken>>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

impl PaypalClient {
    /// Creates a client over the shared pooled HTTP client.
    pub fn new(config: &GatewayConfig) -> Self {
        Self::with_http_client(config, DEFAULT_HTTP_CLIENT.clone())
    }

    /// Creates a client over a caller-supplied HTTP client.
    pub fn with_http_client(config: &GatewayConfig, http: Client) -> Self {
        Self {
            http,
            environment: config.environment(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token: Mutex::new(None),
        }
    }

    /// Environment this client was configured for.
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns a valid bearer token, fetching or refreshing as needed.
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.access_token.clone());
            }
        }
        let fresh = self.fetch_token().await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    async fn fetch_token(&self) -> Result<CachedToken> {
        let url = format!("{}/v1/oauth2/token", self.environment.base_url());
        debug!("fetching access token");
        let response = self
            .http
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let body = read_body(response).await?;
        let token = parse_token_response(body)?;
        let lifetime =
            Duration::from_secs(token.expires_in.saturating_sub(TOKEN_EXPIRY_SLACK.as_secs()));
        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }

    /// Executes one POST against the remote API.
    #[instrument(skip(self, payload))]
    async fn post(&self, path: &str, payload: &Value) -> Result<Value> {
        let token = self.access_token().await?;
        let url = format!("{}{path}", self.environment.base_url());
        let response = self.http.post(&url).bearer_auth(token).json(payload).send().await?;
        debug!(status = response.status().as_u16(), "remote response received");
        read_body(response).await
    }

    /// Create-payment operation (sale, authorize, or token charge).
    pub(crate) async fn create_payment(&self, payload: &Value) -> Result<Value> {
        self.post("/v1/payments/payment", payload).await
    }

    /// Refund-sale operation.
    pub(crate) async fn refund_sale(&self, sale_id: &str, payload: &Value) -> Result<Value> {
        self.post(&format!("/v1/payments/sale/{sale_id}/refund"), payload).await
    }

    /// Void-authorization operation. Carries no payload body.
    pub(crate) async fn void_authorization(&self, authorization_id: &str) -> Result<Value> {
        let empty = Value::Object(Map::new());
        self.post(&format!("/v1/payments/authorization/{authorization_id}/void"), &empty).await
    }

    /// Vault store-card operation.
    pub(crate) async fn store_card(&self, payload: &Value) -> Result<Value> {
        self.post("/v1/vault/credit-cards", payload).await
    }
}

// The secret never appears in logs or panic output.
impl std::fmt::Debug for PaypalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaypalClient")
            .field("environment", &self.environment)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Parses a successful token-endpoint body.
///
/// A 2xx reply missing `access_token` or `expires_in` surfaces as
/// [`GatewayError::UnexpectedResponse`], never as a cached token.
fn parse_token_response(body: Value) -> Result<TokenResponse> {
    serde_json::from_value(body)
        .map_err(|e| GatewayError::UnexpectedResponse(format!("malformed token response: {e}")))
}

/// Applies the single failure-normalization branch.
///
/// Status 400 and above becomes [`GatewayError::Remote`] with the raw
/// error body retained; success bodies must parse as JSON; transport
/// failures have already surfaced as [`GatewayError::Http`] upstream.
async fn read_body(response: reqwest::Response) -> Result<Value> {
    let status = response.status().as_u16();
    let text = response.text().await?;
    if status >= 400 {
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        return Err(GatewayError::Remote { status, body });
    }
    if text.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text)
        .map_err(|e| GatewayError::UnexpectedResponse(format!("malformed response body: {e}")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config() -> GatewayConfig {
        GatewayConfig::new("id", "super-secret-value")
    }

    /// Builds a `reqwest::Response` from a recorded status and body.
    fn recorded_response(status: u16, body: &str) -> reqwest::Response {
        http::Response::builder()
            .status(status)
            .body(body.to_owned())
            .expect("valid recorded response")
            .into()
    }

    #[test]
    fn test_client_selects_live_environment() {
        let client = PaypalClient::new(&config());
        assert_eq!(client.environment(), Environment::Live);
    }

    #[test]
    fn test_client_selects_sandbox_environment() {
        let client = PaypalClient::new(&config().with_test_mode(true));
        assert_eq!(client.environment(), Environment::Sandbox);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let client = PaypalClient::new(&config());
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_no_token_cached_at_construction() {
        let client = PaypalClient::new(&config());
        assert!(client.token.try_lock().expect("uncontended").is_none());
    }

    #[tokio::test]
    async fn test_read_body_error_status_becomes_remote() {
        let remote_body = json!({"name": "VALIDATION_ERROR", "message": "Invalid request"});
        let response = recorded_response(400, &remote_body.to_string());

        let err = read_body(response).await.unwrap_err();
        let GatewayError::Remote { status, body } = err else {
            unreachable!("a 400 response normalizes to a Remote error");
        };
        assert_eq!(status, 400);
        assert_eq!(body, remote_body);
    }

    #[tokio::test]
    async fn test_read_body_remote_error_display_is_status_line() {
        let response = recorded_response(404, r#"{"name": "INVALID_RESOURCE_ID"}"#);
        let err = read_body(response).await.unwrap_err();
        assert_eq!(err.to_string(), "Response Status : 404");
    }

    #[tokio::test]
    async fn test_read_body_non_json_error_body_is_retained_as_text() {
        let response = recorded_response(502, "Bad Gateway");
        let err = read_body(response).await.unwrap_err();
        let GatewayError::Remote { status, body } = err else {
            unreachable!("a 502 response normalizes to a Remote error");
        };
        assert_eq!(status, 502);
        assert_eq!(body, json!("Bad Gateway"));
    }

    #[tokio::test]
    async fn test_read_body_success_parses_json() {
        let response = recorded_response(200, r#"{"id": "PAY-123", "state": "approved"}"#);
        let body = read_body(response).await.unwrap();
        assert_eq!(body["id"], json!("PAY-123"));
    }

    #[tokio::test]
    async fn test_read_body_empty_success_is_null() {
        let response = recorded_response(204, "");
        let body = read_body(response).await.unwrap();
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_read_body_malformed_success_is_unexpected_response() {
        let response = recorded_response(200, "not json at all");
        let err = read_body(response).await.unwrap_err();
        assert!(matches!(err, GatewayError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_parse_token_response() {
        let token = parse_token_response(json!({
            "access_token": "A21AAF...",
            "token_type": "Bearer",
            "expires_in": 32400,
        }))
        .unwrap();
        assert_eq!(token.access_token, "A21AAF...");
        assert_eq!(token.expires_in, 32400);
    }

    #[test]
    fn test_parse_token_response_missing_expiry() {
        let err = parse_token_response(json!({"access_token": "A21AAF..."})).unwrap_err();
        assert!(matches!(err, GatewayError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_parse_token_response_missing_access_token() {
        let err = parse_token_response(json!({"expires_in": 32400})).unwrap_err();
        assert!(matches!(err, GatewayError::UnexpectedResponse(_)));
    }
}
