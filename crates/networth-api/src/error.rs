use thiserror::Error;

/// Top-level error type for the `networth-api` crate.
///
/// Covers every failure mode of the REST surface: authentication,
/// transport, structured backend errors, and payload decoding.
/// `networth-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The backend rejected the configured API token.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Backend ─────────────────────────────────────────────────────
    /// Non-success response from the backend.
    ///
    /// `message` is the `error` member of the JSON body when the backend
    /// supplied one; it is the text shown to users.
    #[error("Backend error (HTTP {status}): {}", message.as_deref().unwrap_or("no details"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the backend reported the resource missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a connection-level failure.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// The backend-supplied error text, if the response carried one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_only_for_api_errors() {
        let err = Error::Api {
            status: 422,
            message: Some("Balance must be positive".into()),
        };
        assert_eq!(err.backend_message(), Some("Balance must be positive"));
        assert!(!err.is_not_found());

        let err = Error::Tls("bad cert".into());
        assert_eq!(err.backend_message(), None);
    }

    #[test]
    fn api_display_without_message() {
        let err = Error::Api {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "Backend error (HTTP 500): no details");
        assert!(
            Error::Api {
                status: 404,
                message: None
            }
            .is_not_found()
        );
    }
}
