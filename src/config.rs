//! Gateway configuration types.
//!
//! Configuration is read once at construction time. There is no
//! environment-variable contract: callers decide where the credentials
//! come from and hand them over here.

use serde::Deserialize;

use crate::error::{GatewayError, Result};

/// Credentials and mode selection for the gateway.
///
/// Both credentials are required; construction of the gateway fails
/// fast when either is missing or empty. The configuration is
/// deserializable so callers can load it from TOML or JSON.
///
/// # Examples
///
/// ```
/// use paypal_gateway::GatewayConfig;
///
/// let toml = r#"
///     client_id = "my-client-id"
///     client_secret = "my-client-secret"
///     test_mode = true
/// "#;
///
/// let config: GatewayConfig = toml::from_str(toml).unwrap();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Deserialize)]
pub struct GatewayConfig {
    /// OAuth2 client identifier issued by the processor.
    pub client_id: String,

    /// OAuth2 client secret issued by the processor.
    pub client_secret: String,

    /// Run against the sandbox environment instead of live.
    #[serde(default)]
    pub test_mode: bool,
}

impl GatewayConfig {
    /// Creates a live-mode configuration from explicit credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), client_secret: client_secret.into(), test_mode: false }
    }

    /// Switches the configuration between sandbox and live mode.
    #[must_use]
    pub fn with_test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    /// Checks that both credentials are present.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingCredential`] naming the first
    /// missing field.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(GatewayError::MissingCredential("client_id"));
        }
        if self.client_secret.trim().is_empty() {
            return Err(GatewayError::MissingCredential("client_secret"));
        }
        Ok(())
    }

    /// Returns the execution environment selected by `test_mode`.
    #[must_use]
    pub fn environment(&self) -> Environment {
        if self.test_mode { Environment::Sandbox } else { Environment::Live }
    }
}

// The secret never appears in logs or panic output.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("test_mode", &self.test_mode)
            .finish()
    }
}

/// Remote execution environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Sandbox environment for integration testing.
    Sandbox,
    /// Live environment.
    #[default]
    Live,
}

impl Environment {
    /// Base URL of the remote REST API for this environment.
    #[must_use]
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://api.sandbox.paypal.com",
            Self::Live => "https://api.paypal.com",
        }
    }
}
