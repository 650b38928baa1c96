// ── Core error types ──
//
// User-facing errors from portglass-core. Consumers never see HTTP
// status codes or JSON parse failures directly -- the
// `From<portglass_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants, keeping the backend's human-readable
// messages where they exist.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection / auth ────────────────────────────────────────────
    #[error("Cannot reach backend: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Administrator role required")]
    Forbidden,

    #[error("Backend is rate limiting requests -- slow down")]
    RateLimited,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Mutation rejected by the backend; carries its message verbatim.
    #[error("Operation rejected: {message}")]
    Rejected { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Invalid port range '{expr}': {reason}")]
    InvalidRange { expr: String, reason: String },

    // ── Lifecycle ────────────────────────────────────────────────────
    /// Normal terminal outcome of a cancelled operation, not a failure.
    #[error("Operation cancelled")]
    Cancelled,

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<portglass_api::Error> for CoreError {
    fn from(err: portglass_api::Error) -> Self {
        match err {
            portglass_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            portglass_api::Error::Forbidden => CoreError::Forbidden,
            portglass_api::Error::RateLimited => CoreError::RateLimited,
            portglass_api::Error::Transport(ref e) => CoreError::ConnectionFailed {
                reason: e.to_string(),
            },
            portglass_api::Error::Tls(reason) => CoreError::ConnectionFailed { reason },
            portglass_api::Error::InvalidUrl(e) => CoreError::Internal(format!("invalid URL: {e}")),
            portglass_api::Error::Api { status: 404, message } => CoreError::NotFound {
                message: if message.is_empty() {
                    "resource".into()
                } else {
                    message
                },
            },
            portglass_api::Error::Api { status, message } => CoreError::Rejected {
                message: if message.is_empty() {
                    format!("HTTP {status}")
                } else {
                    message
                },
            },
            portglass_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("deserialization error: {message}"))
            }
            portglass_api::Error::Cancelled => CoreError::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_messages_survive_translation() {
        let err = CoreError::from(portglass_api::Error::Api {
            status: 500,
            message: "Failed to create device".into(),
        });
        match err {
            CoreError::Rejected { ref message } => assert_eq!(message, "Failed to create device"),
            other => panic!("expected Rejected, got: {other:?}"),
        }
    }

    #[test]
    fn cancellation_is_not_a_failure_variant() {
        let err = CoreError::from(portglass_api::Error::Cancelled);
        assert!(matches!(err, CoreError::Cancelled));
    }

    #[test]
    fn not_found_keeps_the_body() {
        let err = CoreError::from(portglass_api::Error::Api {
            status: 404,
            message: "Device not found".into(),
        });
        match err {
            CoreError::NotFound { ref message } => assert_eq!(message, "Device not found"),
            other => panic!("expected NotFound, got: {other:?}"),
        }
    }
}
