// ── Generic CRUD orchestrator ──
//
// One orchestrator drives one asset page: it owns the page state, issues
// backend calls, and publishes every state change through a `watch`
// channel that renderers subscribe to. It is cheap to clone (Arc inner),
// so UI layers can spawn each action as its own task.
//
// Overlapping loads are resolved with generation numbers: only the most
// recently issued load commits its items. The `loading` / `refreshing`
// flags are derived from in-flight counters so overlapping requests never
// leave a spinner stuck.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_MESSAGE_TTL;
use crate::error::CoreError;
use crate::model::{AssetId, AssetRecord};

use super::api::AssetApi;
use super::config::AssetConfig;
use super::state::{CrudState, Message, ModalFlags, ModalKind, ViewMode};

#[derive(Debug, Clone, Copy)]
enum LoadKind {
    Initial,
    Refresh,
}

struct Inner<T, A> {
    api: A,
    config: AssetConfig<T>,
    state: watch::Sender<CrudState<T>>,
    load_generation: AtomicU64,
    loads_in_flight: AtomicUsize,
    refreshes_in_flight: AtomicUsize,
    message_generation: AtomicU64,
    message_ttl: Duration,
}

/// State and actions for one generic asset page.
pub struct CrudOrchestrator<T, A> {
    inner: Arc<Inner<T, A>>,
}

impl<T, A> Clone for CrudOrchestrator<T, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: AssetRecord, A: AssetApi> CrudOrchestrator<T, A> {
    pub fn new(api: A, config: AssetConfig<T>) -> Self {
        Self::with_message_ttl(api, config, DEFAULT_MESSAGE_TTL)
    }

    /// Like [`new`](Self::new) with a custom success-message lifetime.
    pub fn with_message_ttl(api: A, config: AssetConfig<T>, message_ttl: Duration) -> Self {
        let initial = CrudState {
            view_mode: config.default_view,
            ..CrudState::default()
        };
        let (state, _) = watch::channel(initial);
        Self {
            inner: Arc::new(Inner {
                api,
                config,
                state,
                load_generation: AtomicU64::new(0),
                loads_in_flight: AtomicUsize::new(0),
                refreshes_in_flight: AtomicUsize::new(0),
                message_generation: AtomicU64::new(0),
                message_ttl,
            }),
        }
    }

    // ── Observation ──────────────────────────────────────────────────

    pub fn config(&self) -> &AssetConfig<T> {
        &self.inner.config
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<CrudState<T>> {
        self.inner.state.subscribe()
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> CrudState<T> {
        self.inner.state.borrow().clone()
    }

    fn update_state(&self, f: impl FnOnce(&mut CrudState<T>)) {
        self.inner.state.send_modify(f);
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Load items and schema concurrently. A load failure takes precedence
    /// over a schema failure in the returned error.
    pub async fn initialize(&self) -> Result<(), CoreError> {
        let (items, schema) = tokio::join!(self.load_items(), self.load_schema());
        items?;
        schema
    }

    /// Full load: drives the `loading` flag.
    pub async fn load_items(&self) -> Result<(), CoreError> {
        self.run_load(LoadKind::Initial).await
    }

    /// Manual refresh: drives the `refreshing` flag.
    pub async fn refresh_items(&self) -> Result<(), CoreError> {
        self.run_load(LoadKind::Refresh).await
    }

    fn in_flight(&self, kind: LoadKind) -> &AtomicUsize {
        match kind {
            LoadKind::Initial => &self.inner.loads_in_flight,
            LoadKind::Refresh => &self.inner.refreshes_in_flight,
        }
    }

    fn sync_load_flags(&self, state: &mut CrudState<T>) {
        state.loading = self.inner.loads_in_flight.load(Ordering::SeqCst) > 0;
        state.refreshing = self.inner.refreshes_in_flight.load(Ordering::SeqCst) > 0;
    }

    async fn run_load(&self, kind: LoadKind) -> Result<(), CoreError> {
        let generation = self.inner.load_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.in_flight(kind).fetch_add(1, Ordering::SeqCst);
        self.update_state(|s| {
            self.sync_load_flags(s);
            s.error = None;
        });

        let result = self.inner.api.fetch_all().await;

        self.in_flight(kind).fetch_sub(1, Ordering::SeqCst);
        let latest = self.inner.load_generation.load(Ordering::SeqCst) == generation;
        let label = &self.inner.config.label;

        match result {
            Ok(raw) => {
                let items = self.inner.config.apply_transform(&raw);
                if latest {
                    debug!(asset = %label, count = items.len(), ?kind, "loaded items");
                } else {
                    debug!(asset = %label, generation, "discarding stale load result");
                }
                self.update_state(|s| {
                    self.sync_load_flags(s);
                    if latest {
                        s.items = items;
                        s.raw_data = raw;
                        s.last_loaded = Some(Utc::now());
                    }
                });
                Ok(())
            }
            Err(e) => {
                warn!(asset = %label, error = %e, "failed to load items");
                self.update_state(|s| {
                    self.sync_load_flags(s);
                    if latest {
                        s.error = Some(self.inner.config.load_error());
                    }
                });
                Err(e)
            }
        }
    }

    /// Fetch the generic form schema. A no-op for types without one.
    pub async fn load_schema(&self) -> Result<(), CoreError> {
        if !self.inner.config.capabilities.schema {
            return Ok(());
        }
        match self.inner.api.fetch_schema().await {
            Ok(schema) => {
                debug!(asset = %self.inner.config.label, fields = schema.fields.len(), "loaded schema");
                self.update_state(|s| s.schema = Some(schema));
                Ok(())
            }
            Err(e) => {
                warn!(asset = %self.inner.config.label, error = %e, "failed to load schema");
                Err(e)
            }
        }
    }

    /// Fetch a category's schema, replacing any generic one.
    pub async fn load_schema_for_category(&self, category_id: i64) -> Result<(), CoreError> {
        match self.inner.api.fetch_category_schema(category_id).await {
            Ok(schema) => {
                self.update_state(|s| s.schema = Some(schema));
                Ok(())
            }
            Err(e) => {
                warn!(category_id, error = %e, "failed to load category schema");
                Err(e)
            }
        }
    }

    // ── Modals ───────────────────────────────────────────────────────

    pub fn open_add_modal(&self) {
        self.update_state(|s| {
            s.modals = ModalFlags::only(ModalKind::Add);
            s.selected_item = None;
        });
    }

    pub fn open_edit_modal(&self, item: T) {
        self.open_with_item(ModalKind::Edit, item);
    }

    pub fn open_view_modal(&self, item: T) {
        self.open_with_item(ModalKind::View, item);
    }

    pub fn open_delete_modal(&self, item: T) {
        self.open_with_item(ModalKind::Delete, item);
    }

    fn open_with_item(&self, kind: ModalKind, item: T) {
        self.update_state(|s| {
            s.modals = ModalFlags::only(kind);
            s.selected_item = Some(item);
        });
    }

    pub fn close_modals(&self) {
        self.update_state(|s| {
            s.modals = ModalFlags::default();
            s.selected_item = None;
        });
    }

    // ── Mutations ────────────────────────────────────────────────────

    fn selected_id(&self) -> Option<AssetId> {
        self.inner.state.borrow().selected_item.as_ref().map(AssetRecord::id)
    }

    fn unsupported(&self, operation: &str) -> CoreError {
        CoreError::Unsupported {
            operation: operation.into(),
            asset: self.inner.config.label.clone(),
        }
    }

    /// Create a record from `form`. On success the list is reloaded, modals
    /// close, and a success message is shown. On failure the modal stays
    /// open and an error message is shown.
    pub async fn handle_create(&self, form: Value) -> Result<(), CoreError> {
        let config = &self.inner.config;
        if !config.capabilities.create {
            return Err(self.unsupported("create"));
        }

        self.update_state(|s| s.submitting = true);
        match self.inner.api.create(&form).await {
            Ok(_) => {
                info!(asset = %config.label, "record created");
                self.finish_mutation(config.created_message()).await;
                Ok(())
            }
            Err(e) => {
                warn!(asset = %config.label, error = %e, "create failed");
                self.fail_submit(e.user_message(&config.create_fallback()));
                Err(e)
            }
        }
    }

    /// Update the selected record with `form`.
    pub async fn handle_update(&self, form: Value) -> Result<(), CoreError> {
        let config = &self.inner.config;
        if !config.capabilities.update {
            return Err(self.unsupported("update"));
        }
        let Some(id) = self.selected_id() else {
            return Err(CoreError::NoSelection {
                operation: "update".into(),
                asset: config.noun.to_lowercase(),
            });
        };

        self.update_state(|s| s.submitting = true);
        match self.inner.api.update(id, &form).await {
            Ok(_) => {
                info!(asset = %config.label, %id, "record updated");
                self.finish_mutation(config.updated_message()).await;
                Ok(())
            }
            Err(e) => {
                warn!(asset = %config.label, %id, error = %e, "update failed");
                self.fail_submit(e.user_message(&config.update_fallback()));
                Err(e)
            }
        }
    }

    /// Delete the selected record. Failures land in the page-level `error`
    /// and leave the confirmation modal open.
    pub async fn handle_delete(&self) -> Result<(), CoreError> {
        let config = &self.inner.config;
        if !config.capabilities.delete {
            return Err(self.unsupported("delete"));
        }
        let Some(id) = self.selected_id() else {
            return Err(CoreError::NoSelection {
                operation: "delete".into(),
                asset: config.noun.to_lowercase(),
            });
        };

        self.update_state(|s| s.submitting = true);
        match self.inner.api.delete(id).await {
            Ok(()) => {
                info!(asset = %config.label, %id, "record deleted");
                self.finish_mutation(config.deleted_message()).await;
                Ok(())
            }
            Err(e) => {
                warn!(asset = %config.label, %id, error = %e, "delete failed");
                let text = e.user_message(&config.delete_fallback());
                self.update_state(|s| {
                    s.error = Some(text);
                    s.submitting = false;
                });
                Err(e)
            }
        }
    }

    /// Success path shared by create/update/delete: message, reload, close.
    async fn finish_mutation(&self, text: String) {
        self.show_success(text);
        // A failed reload is already recorded in `error`.
        let _ = self.load_items().await;
        self.update_state(|s| {
            s.modals = ModalFlags::default();
            s.selected_item = None;
            s.submitting = false;
        });
    }

    fn fail_submit(&self, text: String) {
        self.inner.message_generation.fetch_add(1, Ordering::SeqCst);
        self.update_state(|s| {
            s.message = Some(Message::error(text));
            s.submitting = false;
        });
    }

    // ── Messages & view ──────────────────────────────────────────────

    /// Show a success message and schedule its dismissal after the TTL,
    /// unless it has been replaced or dismissed by then.
    fn show_success(&self, text: String) {
        let generation = self.inner.message_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.update_state(|s| s.message = Some(Message::success(text)));

        let weak: Weak<Inner<T, A>> = Arc::downgrade(&self.inner);
        let ttl = self.inner.message_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(inner) = weak.upgrade() {
                if inner.message_generation.load(Ordering::SeqCst) == generation {
                    inner.state.send_modify(|s| s.message = None);
                }
            }
        });
    }

    pub fn dismiss_message(&self) {
        self.inner.message_generation.fetch_add(1, Ordering::SeqCst);
        self.update_state(|s| s.message = None);
    }

    pub fn dismiss_error(&self) {
        self.update_state(|s| s.error = None);
    }

    pub fn set_view_mode(&self, mode: ViewMode) {
        self.update_state(|s| s.view_mode = mode);
    }
}
