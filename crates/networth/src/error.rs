//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable process exit code.

use miette::Diagnostic;
use thiserror::Error;

use networth_config::ConfigError;
use networth_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to backend at {url}")]
    #[diagnostic(
        code(networth::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Reason: {reason}\n\
             Try: networth health --backend {url}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(networth::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(networth::auth_failed),
        help(
            "Verify the API token for this profile.\n\
             Store a new one with: networth config set-token"
        )
    )]
    AuthFailed { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource} not found")]
    #[diagnostic(
        code(networth::not_found),
        help("Run: networth list {kind} to see available records")
    )]
    NotFound { resource: String, kind: String },

    // ── Backend ──────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(networth::backend))]
    Backend { status: u16, message: String },

    #[error("Unexpected response from backend: {message}")]
    #[diagnostic(code(networth::invalid_data))]
    InvalidData { message: String },

    #[error("{operation} is not supported for {asset}")]
    #[diagnostic(code(networth::unsupported))]
    Unsupported { operation: String, asset: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(networth::validation))]
    Validation { field: String, reason: String },

    #[error("Form has {} problem(s):\n  {}", problems.len(), problems.join("\n  "))]
    #[diagnostic(
        code(networth::form_invalid),
        help("See the expected fields with: networth schema {kind}")
    )]
    InvalidForm { kind: String, problems: Vec<String> },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(networth::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: networth config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(networth::no_config),
        help(
            "Create a profile with: networth config init\n\
             Or pass --backend <URL>. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(networth::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(networth::io))]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(networth::json), help("Check the JSON contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Backend { status: 404, .. } => exit_code::NOT_FOUND,
            Self::Backend { .. } => exit_code::REJECTED,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::InvalidForm { .. } | Self::Json(_) => {
                exit_code::USAGE
            }
            Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Timeout => Self::Timeout,
            CoreError::NotFound {
                message: Some(message),
                ..
            } => Self::Backend {
                status: 404,
                message,
            },
            CoreError::NotFound { resource, .. } => Self::NotFound {
                resource,
                kind: "<kind>".into(),
            },
            CoreError::InvalidData { message } => Self::InvalidData { message },
            CoreError::Unsupported { operation, asset } => Self::Unsupported { operation, asset },
            CoreError::NoSelection { operation, asset } => Self::Validation {
                field: asset,
                reason: format!("no record selected for {operation}"),
            },
            CoreError::ValidationFailed { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Backend { status, message } => Self::Backend {
                status,
                message: message.unwrap_or_else(|| format!("Backend returned HTTP {status}")),
            },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}
