//! `networth-tui`: terminal dashboard for a net-worth backend.
//!
//! Built on [ratatui](https://ratatui.rs). Every asset page is the same
//! generic screen driven by a `networth-core` CRUD orchestrator; screens are
//! navigable via number keys (1-9): Dashboard, the seven asset types, and
//! Status.
//!
//! Logs are written to a file under the platform data directory so they
//! never corrupt the terminal UI.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod views;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr};
use secrecy::SecretString;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use networth_core::{BackendConfig, TlsVerification};

use crate::app::App;
use crate::theme::ThemeVariant;

/// Terminal dashboard for tracking net worth across every asset class.
#[derive(Parser, Debug)]
#[command(name = "networth-tui", version, about)]
struct Cli {
    /// Config profile to use
    #[arg(short = 'p', long, env = "NETWORTH_PROFILE")]
    profile: Option<String>,

    /// Backend URL (overrides the profile)
    #[arg(short = 'b', long, env = "NETWORTH_BACKEND")]
    backend: Option<String>,

    /// API token (overrides the profile)
    #[arg(long, env = "NETWORTH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Colour palette (defaults to the configured theme)
    #[arg(long, value_enum)]
    theme: Option<ThemeVariant>,

    /// Accept self-signed TLS certificates
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Log file path (defaults to the networth data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. Logging to stdout/stderr would corrupt the TUI.
/// The returned guard must live as long as the app so logs are flushed.
fn setup_tracing(cli: &Cli) -> Result<WorkerGuard> {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "networth_tui={log_level},networth_core={log_level},networth_api={log_level}"
        ))
    });

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| networth_config::log_dir().join("networth-tui.log"));
    let log_dir = log_file
        .parent()
        .map_or_else(std::env::temp_dir, std::path::Path::to_path_buf);
    let log_filename = log_file
        .file_name()
        .map_or_else(|| "networth-tui.log".into(), std::ffi::OsStr::to_os_string);
    std::fs::create_dir_all(&log_dir)
        .wrap_err_with(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Ok(guard)
}

/// Profile from the config file, then flag overrides on top.
fn resolve_backend(cli: &Cli, cfg: &networth_config::Config) -> Result<BackendConfig> {
    let mut backend = match cfg.profile(cli.profile.as_deref()) {
        Ok((name, profile)) => {
            networth_config::profile_to_backend_config(profile, &name, &cfg.defaults)?
        }
        Err(e) if cli.backend.is_none() => {
            return Err(Report::new(e).wrap_err(
                "no backend configured: run `networth config init` or pass --backend",
            ));
        }
        Err(_) => BackendConfig {
            timeout: Duration::from_secs(cfg.defaults.timeout),
            message_ttl: Duration::from_millis(cfg.defaults.message_ttl_ms),
            ..BackendConfig::default()
        },
    };

    if let Some(ref raw) = cli.backend {
        backend.url = url::Url::parse(raw).wrap_err_with(|| format!("invalid backend URL: {raw}"))?;
    }
    if let Some(ref token) = cli.token {
        backend.token = Some(SecretString::from(token.clone()));
    }
    if cli.insecure {
        backend.tls = TlsVerification::DangerAcceptInvalid;
    }
    Ok(backend)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in before the terminal is touched.
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli)?;

    let cfg = networth_config::load_config_or_default();
    let backend = resolve_backend(&cli, &cfg)?;
    let variant = cli
        .theme
        .unwrap_or_else(|| ThemeVariant::from_config(&cfg.defaults.theme));
    theme::set_variant(variant);

    info!(url = %backend.url, theme = ?variant, "starting networth-tui");

    let client = backend.build_client()?;
    let mut app = App::new(client, backend.message_ttl);
    app.run().await?;

    Ok(())
}
