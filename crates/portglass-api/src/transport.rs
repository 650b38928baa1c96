// Shared transport configuration for building reqwest::Client instances.
//
// The backend authenticates with an HttpOnly session cookie, so every
// client carries a cookie jar. TLS and timeout settings live here to
// avoid duplicated builder logic between consumers.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;

use crate::error::Error;

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Accept self-signed certificates (backends behind ad-hoc TLS).
    pub danger_accept_invalid_certs: bool,
    pub timeout: Duration,
    pub cookie_jar: Option<Arc<Jar>>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            danger_accept_invalid_certs: false,
            timeout: Duration::from_secs(30),
            cookie_jar: None,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// A cookie jar is created if none was supplied -- the session token
    /// cookie must persist across requests.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let jar = self
            .cookie_jar
            .clone()
            .unwrap_or_else(|| Arc::new(Jar::default()));

        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("portglass/", env!("CARGO_PKG_VERSION")))
            .cookie_provider(jar);

        if self.danger_accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    /// Create a config with a fresh cookie jar.
    pub fn with_cookie_jar(mut self) -> Self {
        self.cookie_jar = Some(Arc::new(Jar::default()));
        self
    }
}
