// ── Observable page state ──

use chrono::{DateTime, Utc};
use serde_json::Value;
use strum::{Display, EnumIter};

use networth_api::FormSchema;

/// How a page presents its items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ViewMode {
    #[default]
    Table,
    Cards,
    Chart,
}

impl ViewMode {
    /// Next mode in the cycle (wraps around).
    pub fn next(self) -> Self {
        match self {
            Self::Table => Self::Cards,
            Self::Cards => Self::Chart,
            Self::Chart => Self::Table,
        }
    }
}

/// The four modals a page can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Add,
    Edit,
    View,
    Delete,
}

/// Open/closed flag for each modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalFlags {
    pub add: bool,
    pub edit: bool,
    pub view: bool,
    pub delete: bool,
}

impl ModalFlags {
    /// The first open modal, if any.
    pub fn active(self) -> Option<ModalKind> {
        if self.add {
            Some(ModalKind::Add)
        } else if self.edit {
            Some(ModalKind::Edit)
        } else if self.view {
            Some(ModalKind::View)
        } else if self.delete {
            Some(ModalKind::Delete)
        } else {
            None
        }
    }

    pub fn any_open(self) -> bool {
        self.active().is_some()
    }

    /// Flags with exactly `kind` open.
    pub fn only(kind: ModalKind) -> Self {
        let mut flags = Self::default();
        match kind {
            ModalKind::Add => flags.add = true,
            ModalKind::Edit => flags.edit = true,
            ModalKind::View => flags.view = true,
            ModalKind::Delete => flags.delete = true,
        }
        flags
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// A transient banner shown on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

/// Everything a renderer needs to draw one asset page.
#[derive(Debug, Clone)]
pub struct CrudState<T> {
    pub items: Vec<T>,
    /// Last successful list payload, untransformed.
    pub raw_data: Value,
    /// A full load is in flight.
    pub loading: bool,
    /// A manual refresh is in flight.
    pub refreshing: bool,
    /// Persistent page-level error (load and delete failures).
    pub error: Option<String>,
    pub modals: ModalFlags,
    pub selected_item: Option<T>,
    pub schema: Option<FormSchema>,
    pub submitting: bool,
    pub message: Option<Message>,
    pub view_mode: ViewMode,
    pub last_loaded: Option<DateTime<Utc>>,
}

impl<T> Default for CrudState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            raw_data: Value::Null,
            loading: false,
            refreshing: false,
            error: None,
            modals: ModalFlags::default(),
            selected_item: None,
            schema: None,
            submitting: false,
            message: None,
            view_mode: ViewMode::default(),
            last_loaded: None,
        }
    }
}

impl<T> CrudState<T> {
    /// Either kind of load is in flight.
    pub fn busy(&self) -> bool {
        self.loading || self.refreshing
    }

    pub fn active_modal(&self) -> Option<ModalKind> {
        self.modals.active()
    }
}
