//! Client configuration

use std::time::Duration;

use crate::session::Session;
use crate::{ClientResult, NetworkHttpClient};

/// Client configuration for connecting to the menu backend
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | CARTA_API_URL | http://localhost:8080 | Backend base URL |
/// | CARTA_API_TOKEN | (none) | Bearer token |
/// | CARTA_COMMERCE | (none) | Commerce slug sent as `X-Commerce` |
/// | CARTA_REQUEST_TIMEOUT_SECS | 30 | Per-request timeout |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "https://api.carta.app")
    pub base_url: String,

    /// Token and commerce attached to every request
    pub session: Session,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            session: Session::anonymous(),
            timeout: 30,
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("CARTA_API_URL").unwrap_or_else(|_| "http://localhost:8080".into()),
        );
        if let Ok(token) = std::env::var("CARTA_API_TOKEN") {
            config = config.with_token(token);
        }
        if let Ok(commerce) = std::env::var("CARTA_COMMERCE") {
            config = config.with_commerce(commerce);
        }
        config.timeout = std::env::var("CARTA_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.session.token = Some(token.into());
        self
    }

    /// Scope requests to a commerce
    pub fn with_commerce(mut self, commerce: impl Into<String>) -> Self {
        self.session.commerce = Some(commerce.into());
        self
    }

    /// Replace the whole session
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
