use thiserror::Error;

/// Top-level error type for the `portglass-api` crate.
///
/// Covers every failure mode of the backend surface: session auth,
/// transport, endpoint errors, and cooperative cancellation.
/// `portglass-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected or session cookie expired (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Session is valid but lacks the required role (HTTP 403).
    #[error("Forbidden: administrator role required")]
    Forbidden,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Rate limited by the backend (it throttles per client IP).
    #[error("Rate limited by backend")]
    RateLimited,

    // ── Endpoint errors ─────────────────────────────────────────────
    /// Non-2xx response. The backend emits plain-text bodies
    /// (`http.Error` style), carried verbatim in `message`.
    #[error("Backend error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Lifecycle ───────────────────────────────────────────────────
    /// The request was cancelled before completion. Not a failure --
    /// callers treat this as a normal terminal outcome.
    #[error("Request cancelled")]
    Cancelled,
}

impl Error {
    /// Returns `true` if this error indicates the session has expired
    /// and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the request was cancelled rather than failed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
