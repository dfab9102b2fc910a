//! Status screen: backend health, per-service status, API spec download.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use networth_api::ApiClient;
use networth_core::HealthStatus;

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::money::fmt_age;

/// Where `s` writes the backend's API description.
const API_SPEC_FILE: &str = "networth-openapi.json";

/// Write the API description to `path`, creating parent directories.
pub fn save_api_spec(path: &Path, contents: &str) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(path.to_path_buf())
}

pub struct StatusScreen {
    client: ApiClient,
    health: Option<Arc<HealthStatus>>,
    error: Option<String>,
    loading: bool,
    loaded: bool,
    checked_at: Option<DateTime<Utc>>,
    action_tx: Option<UnboundedSender<Action>>,
}

impl StatusScreen {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            health: None,
            error: None,
            loading: false,
            loaded: false,
            checked_at: None,
            action_tx: None,
        }
    }

    fn check(&mut self) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        self.loading = true;
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = client.health().await.map(Arc::new).map_err(|e| {
                warn!(error = %e, "health check failed");
                e.to_string()
            });
            let _ = tx.send(Action::HealthLoaded(result));
        });
    }

    fn download_spec(&self) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = match client.api_spec_raw().await {
                Ok(raw) => {
                    save_api_spec(Path::new(API_SPEC_FILE), &raw).map_err(|e| e.to_string())
                }
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(Action::ApiSpecSaved(result));
        });
    }

    fn render_health(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Backend ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from(vec![
            Span::styled("  URL       ", theme::key_hint()),
            Span::styled(self.client.base_url().to_string(), theme::text()),
        ])];

        if let Some(ref health) = self.health {
            let overall = if health.is_healthy() {
                theme::success()
            } else {
                theme::error()
            };
            let status = if health.status.is_empty() {
                "unknown"
            } else {
                health.status.as_str()
            };
            lines.push(Line::from(vec![
                Span::styled("  Status    ", theme::key_hint()),
                Span::styled(format!("● {status}"), overall),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Version   ", theme::key_hint()),
                Span::styled(
                    health.version.clone().unwrap_or_else(|| "-".into()),
                    theme::text(),
                ),
            ]));
            lines.push(Line::default());

            let services = health.services();
            if services.is_empty() {
                lines.push(Line::styled("  No service details reported", theme::key_hint()));
            }
            for (name, service) in services {
                let style = if service.is_healthy() {
                    theme::success()
                } else {
                    theme::error()
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("  {name:<10}"), theme::key_hint()),
                    Span::styled(format!("● {}", service.label()), style),
                ]));
            }
        } else if !self.loading && self.error.is_none() {
            lines.push(Line::styled("  Not checked yet", theme::key_hint()));
        }

        if let Some(ref error) = self.error {
            lines.push(Line::default());
            lines.push(Line::styled(format!("  ✗ {error}"), theme::error()));
        }
        if self.loading {
            lines.push(Line::default());
            lines.push(Line::styled("  Checking…", theme::warning()));
        } else if let Some(at) = self.checked_at {
            lines.push(Line::default());
            lines.push(Line::styled(
                format!("  checked {}", fmt_age(at, Utc::now())),
                theme::key_hint(),
            ));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for StatusScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn set_focused(&mut self, focused: bool) {
        if focused && !self.loaded {
            self.loaded = true;
            self.check();
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('r') if !self.loading => self.check(),
            KeyCode::Char('s') => self.download_spec(),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::HealthLoaded(Ok(health)) => {
                self.loading = false;
                self.error = None;
                self.health = Some(Arc::clone(health));
                self.checked_at = Some(Utc::now());
            }
            Action::HealthLoaded(Err(message)) => {
                self.loading = false;
                self.error = Some(message.clone());
                self.checked_at = Some(Utc::now());
            }
            Action::ApiSpecSaved(Ok(path)) => {
                info!(path = %path.display(), "saved API spec");
                return Ok(Some(Action::Notify(Notification::success(format!(
                    "API spec saved to {}",
                    path.display()
                )))));
            }
            Action::ApiSpecSaved(Err(message)) => {
                return Ok(Some(Action::Notify(Notification::error(format!(
                    "Could not save API spec: {message}"
                )))));
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        self.render_health(frame, area);
    }

    fn hints(&self) -> String {
        "r recheck  s save API spec".into()
    }
}
