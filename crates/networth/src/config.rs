//! CLI configuration: a thin layer over `networth_config`.
//!
//! Resolves the active profile and applies `GlobalOpts` flag overrides
//! (--backend, --token, --insecure, --timeout) on top of it.

use std::time::Duration;

use secrecy::SecretString;

use networth_core::{BackendConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use networth_config::{
    Config, Profile, config_path, load_config_or_default, save_config,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Build the runtime `BackendConfig` from the config file, the active
/// profile, and CLI overrides. Flags take priority over profile values.
pub fn resolve_backend(global: &GlobalOpts) -> Result<BackendConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut backend = match cfg.profiles.get(&profile_name) {
        Some(profile) => {
            networth_config::profile_to_backend_config(profile, &profile_name, &cfg.defaults)?
        }
        // An explicitly named profile must exist.
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None if global.backend.is_some() => BackendConfig {
            timeout: Duration::from_secs(cfg.defaults.timeout),
            message_ttl: Duration::from_millis(cfg.defaults.message_ttl_ms),
            ..BackendConfig::default()
        },
        None => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    if let Some(ref raw) = global.backend {
        backend.url = raw.parse().map_err(|_| CliError::Validation {
            field: "backend".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }
    if let Some(ref token) = global.token {
        backend.token = Some(SecretString::from(token.clone()));
    }
    if global.insecure {
        backend.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        backend.timeout = Duration::from_secs(secs);
    }

    tracing::debug!(profile = %profile_name, url = %backend.url, "resolved backend");
    Ok(backend)
}
