// ── Runtime backend configuration ──
//
// Describes *how* to reach a networth backend. Carries the token and
// connection tuning but never touches disk: the CLI/TUI builds a
// `BackendConfig` (usually via networth-config) and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use networth_api::{ApiClient, TlsMode, TransportConfig};

use crate::error::CoreError;

/// Default lifetime of transient success messages.
pub const DEFAULT_MESSAGE_TTL: Duration = Duration::from_millis(3000);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs on a home server).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Backend base URL (e.g., `http://localhost:8080`).
    pub url: Url,
    /// Optional bearer token.
    pub token: Option<SecretString>,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// How long success messages stay visible.
    pub message_ttl: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            // Static literal; parse cannot fail.
            url: Url::parse("http://localhost:8080").unwrap_or_else(|_| unreachable!()),
            token: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            message_ttl: DEFAULT_MESSAGE_TTL,
        }
    }
}

impl BackendConfig {
    /// Transport settings for the API client.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }

    /// Build an [`ApiClient`] for this backend.
    pub fn build_client(&self) -> Result<ApiClient, CoreError> {
        Ok(ApiClient::new(
            self.url.as_str(),
            &self.transport(),
            self.token.as_ref(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_localhost() {
        let config = BackendConfig::default();
        assert_eq!(config.url.as_str(), "http://localhost:8080/");
        assert_eq!(config.message_ttl, Duration::from_millis(3000));
        assert!(config.build_client().is_ok());
    }

    #[test]
    fn insecure_maps_to_danger_mode() {
        let config = BackendConfig {
            tls: TlsVerification::DangerAcceptInvalid,
            ..BackendConfig::default()
        };
        assert!(matches!(config.transport().tls, TlsMode::DangerAcceptInvalid));
    }
}
