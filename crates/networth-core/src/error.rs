// ── Core error types ──
//
// Domain errors surfaced by networth-core. Consumers never match on HTTP
// plumbing directly: the `From<networth_api::Error>` impl translates
// transport-layer failures into these variants, keeping the backend's own
// error text where it supplied one.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Backend request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {}", message.as_deref().unwrap_or(resource.as_str()))]
    NotFound {
        resource: String,
        /// The `error` member of the backend's 404 body, if any.
        message: Option<String>,
    },

    #[error("Invalid data from backend: {message}")]
    InvalidData { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("{operation} is not supported for {asset}")]
    Unsupported { operation: String, asset: String },

    #[error("No {asset} selected for {operation}")]
    NoSelection { operation: String, asset: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Backend errors (wrapped, not exposed raw) ────────────────────
    #[error("Backend error (HTTP {status}): {}", message.as_deref().unwrap_or("no details"))]
    Backend {
        status: u16,
        /// The `error` member of the backend's JSON body, if any.
        message: Option<String>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Text to show an end user: the backend-provided message when present,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Backend {
                message: Some(message),
                ..
            }
            | Self::NotFound {
                message: Some(message),
                ..
            } => message.clone(),
            Self::AuthenticationFailed { message } => message.clone(),
            _ => fallback.to_owned(),
        }
    }

    /// Whether the error was raised locally without touching the backend.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Unsupported { .. } | Self::NoSelection { .. } | Self::ValidationFailed { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<networth_api::Error> for CoreError {
    fn from(err: networth_api::Error) -> Self {
        match err {
            networth_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            networth_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Backend {
                        status: e.status().map_or(0, |s| s.as_u16()),
                        message: None,
                    }
                }
            }
            networth_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid backend URL: {e}"),
            },
            networth_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            networth_api::Error::Api {
                status: 404,
                message,
            } => CoreError::NotFound {
                resource: "resource".into(),
                message,
            },
            networth_api::Error::Api { status, message } => CoreError::Backend { status, message },
            networth_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidData { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_backend_text() {
        let err = CoreError::from(networth_api::Error::Api {
            status: 400,
            message: Some("Symbol is required".into()),
        });
        assert_eq!(err.user_message("Failed to add stock holding"), "Symbol is required");
    }

    #[test]
    fn user_message_falls_back() {
        let err = CoreError::from(networth_api::Error::Api {
            status: 500,
            message: None,
        });
        assert_eq!(err.user_message("Failed to add cash holding"), "Failed to add cash holding");

        let err = CoreError::Timeout;
        assert_eq!(err.user_message("fallback"), "fallback");
    }

    #[test]
    fn not_found_maps_to_domain_variant() {
        let err = CoreError::from(networth_api::Error::Api {
            status: 404,
            message: None,
        });
        assert!(matches!(err, CoreError::NotFound { .. }));
        assert_eq!(
            err.user_message("Failed to delete cash holding"),
            "Failed to delete cash holding"
        );
    }

    #[test]
    fn not_found_keeps_backend_text() {
        let err = CoreError::from(networth_api::Error::Api {
            status: 404,
            message: Some("Cash holding not found".into()),
        });
        assert!(matches!(err, CoreError::NotFound { .. }));
        assert_eq!(err.to_string(), "Not found: Cash holding not found");
        assert_eq!(
            err.user_message("Failed to update cash holding"),
            "Cash holding not found"
        );
    }

    #[test]
    fn local_errors_are_flagged() {
        assert!(
            CoreError::NoSelection {
                operation: "update".into(),
                asset: "cash holding".into()
            }
            .is_local()
        );
        assert!(!CoreError::Timeout.is_local());
    }
}
