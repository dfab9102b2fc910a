//! UI actions. Every state transition outside a screen's own key handling
//! travels through the app loop as one of these.

use std::path::PathBuf;
use std::sync::Arc;

use networth_core::{HealthStatus, NetWorthSummary};

use crate::screen::ScreenId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast shown in the status bar until it expires or is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    ToggleHelp,
    ToggleTheme,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),

    // ── Background results ────────────────────────────────────────
    SummaryLoaded(Result<Arc<NetWorthSummary>, String>),
    HealthLoaded(Result<Arc<HealthStatus>, String>),
    ApiSpecSaved(Result<PathBuf, String>),
}
