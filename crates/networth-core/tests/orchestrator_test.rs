#![allow(clippy::unwrap_used)]
// Behavioral tests for `CrudOrchestrator` over an in-memory backend.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use networth_core::{
    AssetApi, AssetCategory, AssetConfig, AssetId, AssetRecord, Capabilities, CashHolding,
    CoreError, CrudOrchestrator, EquityGrant, FormSchema, ManualEntry, MessageKind,
    RealEstateProperty, StockHolding, ViewMode,
};

// ── Fake backend ────────────────────────────────────────────────────

#[derive(Default)]
struct FakeState {
    records: Vec<Value>,
    next_id: i64,
    calls: Vec<String>,
    /// Scripted `fetch_all` responses: (delay, payload). Falls back to `records`.
    scripted_fetches: VecDeque<(Duration, Value)>,
    fail_fetch: bool,
    fail_create: Option<(u16, Option<String>)>,
    fail_delete: Option<(u16, Option<String>)>,
}

#[derive(Clone, Default)]
struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    fn with_records(records: Vec<Value>) -> Self {
        let api = Self::default();
        {
            let mut s = api.state.lock().unwrap();
            s.next_id = i64::try_from(records.len()).unwrap() + 1;
            s.records = records;
        }
        api
    }

    fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn set(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut self.state.lock().unwrap());
    }
}

fn backend_error((status, message): (u16, Option<String>)) -> CoreError {
    CoreError::Backend { status, message }
}

impl AssetApi for FakeApi {
    async fn fetch_all(&self) -> Result<Value, CoreError> {
        let (delay, payload, fail) = {
            let mut s = self.state.lock().unwrap();
            s.calls.push("fetch_all".into());
            match s.scripted_fetches.pop_front() {
                Some((delay, payload)) => (delay, payload, false),
                None => (Duration::ZERO, Value::Array(s.records.clone()), s.fail_fetch),
            }
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if fail {
            return Err(CoreError::Timeout);
        }
        Ok(payload)
    }

    async fn create(&self, body: &Value) -> Result<Value, CoreError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(format!("create {body}"));
        if let Some(err) = s.fail_create.clone() {
            return Err(backend_error(err));
        }
        let mut record = body.clone();
        record["id"] = json!(s.next_id);
        s.next_id += 1;
        s.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: AssetId, body: &Value) -> Result<Value, CoreError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(format!("update {id}"));
        let record = s
            .records
            .iter_mut()
            .find(|r| r["id"] == json!(id.get()))
            .ok_or(CoreError::NotFound {
                resource: id.to_string(),
                message: None,
            })?;
        if let (Value::Object(target), Value::Object(changes)) = (record, body) {
            for (k, v) in changes {
                target.insert(k.clone(), v.clone());
            }
        }
        Ok(body.clone())
    }

    async fn delete(&self, id: AssetId) -> Result<(), CoreError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(format!("delete {id}"));
        if let Some(err) = s.fail_delete.clone() {
            return Err(backend_error(err));
        }
        s.records.retain(|r| r["id"] != json!(id.get()));
        Ok(())
    }

    async fn fetch_schema(&self) -> Result<FormSchema, CoreError> {
        self.state.lock().unwrap().calls.push("fetch_schema".into());
        Ok(serde_json::from_value(json!({
            "name": "cash_holding",
            "fields": [{"name": "account_name", "type": "text", "required": true}]
        }))
        .unwrap())
    }

    async fn fetch_category_schema(&self, category_id: i64) -> Result<FormSchema, CoreError> {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(format!("fetch_category_schema {category_id}"));
        Ok(FormSchema {
            name: format!("category-{category_id}"),
            ..FormSchema::default()
        })
    }
}

fn cash(id: i64, name: &str, balance: f64) -> Value {
    json!({"id": id, "account_name": name, "institution_name": "Bank", "current_balance": balance})
}

fn cash_page(api: FakeApi) -> CrudOrchestrator<CashHolding, FakeApi> {
    CrudOrchestrator::new(api, AssetConfig::standard())
}

// ── Loading ─────────────────────────────────────────────────────────

#[tokio::test]
async fn initialize_loads_items_and_schema() {
    let api = FakeApi::with_records(vec![cash(1, "Checking", 100.0)]);
    let page = cash_page(api.clone());

    page.initialize().await.unwrap();

    let state = page.snapshot();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.schema.unwrap().name, "cash_holding");
    assert!(!state.loading);
    assert!(state.last_loaded.is_some());
    assert_eq!(state.view_mode, ViewMode::Table);
}

#[tokio::test]
async fn reload_is_idempotent() {
    let api = FakeApi::with_records(vec![cash(1, "Checking", 100.0), cash(2, "Savings", 5.5)]);
    let page = cash_page(api);

    page.load_items().await.unwrap();
    let first = page.snapshot().items;
    page.load_items().await.unwrap();
    let second = page.snapshot().items;

    assert_eq!(first, second);
    assert_eq!(second.len(), 2);
}

#[tokio::test]
async fn load_failure_keeps_last_items() {
    let api = FakeApi::with_records(vec![cash(1, "Checking", 100.0)]);
    let page = cash_page(api.clone());
    page.load_items().await.unwrap();

    api.set(|s| s.fail_fetch = true);
    let result = page.refresh_items().await;

    assert!(matches!(result, Err(CoreError::Timeout)));
    let state = page.snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to load cash holdings"));
    assert_eq!(state.items.len(), 1);
    assert!(!state.refreshing);
    assert!(!state.loading);
}

#[tokio::test]
async fn non_numeric_balance_loads_as_zero() {
    let api = FakeApi::with_records(vec![json!({
        "id": 1, "account_name": "Odd", "current_balance": "not-a-number"
    })]);
    let page = cash_page(api);
    page.load_items().await.unwrap();

    let state = page.snapshot();
    assert!(state.items[0].current_balance.abs() < f64::EPSILON);
    assert_eq!(state.raw_data[0]["current_balance"], "not-a-number");
}

#[tokio::test(start_paused = true)]
async fn stale_load_does_not_overwrite_newer_result() {
    let api = FakeApi::default();
    api.set(|s| {
        s.scripted_fetches.push_back((
            Duration::from_millis(500),
            json!([cash(1, "Stale", 1.0)]),
        ));
        s.scripted_fetches.push_back((
            Duration::from_millis(10),
            json!([cash(2, "Fresh", 2.0)]),
        ));
    });
    let page = cash_page(api);

    let slow = page.load_items();
    let fast = async {
        tokio::time::sleep(Duration::from_millis(1)).await;
        page.refresh_items().await
    };
    let (slow, fast) = tokio::join!(slow, fast);
    slow.unwrap();
    fast.unwrap();

    let state = page.snapshot();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].account_name, "Fresh");
    assert!(!state.loading);
    assert!(!state.refreshing);
}

#[tokio::test(start_paused = true)]
async fn loading_flag_tracks_in_flight_loads() {
    let api = FakeApi::default();
    api.set(|s| {
        s.scripted_fetches
            .push_back((Duration::from_millis(100), json!([])));
    });
    let page = cash_page(api);
    let mut rx = page.subscribe();

    let observer = async {
        rx.changed().await.unwrap();
        let state = rx.borrow_and_update().clone();
        (state.loading, state.refreshing)
    };
    let (seen, load) = tokio::join!(observer, page.load_items());
    load.unwrap();

    assert_eq!(seen, (true, false));
    assert!(!page.snapshot().loading);
}

// ── Modals ──────────────────────────────────────────────────────────

fn assert_close_resets<T: AssetRecord + Default + std::fmt::Debug>() {
    let page: CrudOrchestrator<T, FakeApi> =
        CrudOrchestrator::new(FakeApi::default(), AssetConfig::standard());

    page.open_edit_modal(T::default());
    assert!(page.snapshot().modals.edit);
    assert!(page.snapshot().selected_item.is_some());
    page.close_modals();
    let state = page.snapshot();
    assert!(!state.modals.any_open());
    assert!(state.selected_item.is_none());

    page.open_view_modal(T::default());
    page.open_delete_modal(T::default());
    page.open_add_modal();
    page.close_modals();
    let state = page.snapshot();
    assert!(!state.modals.add && !state.modals.edit && !state.modals.view && !state.modals.delete);
    assert!(state.selected_item.is_none());
}

#[tokio::test]
async fn close_modals_resets_every_asset_page() {
    assert_close_resets::<CashHolding>();
    assert_close_resets::<StockHolding>();
    assert_close_resets::<RealEstateProperty>();
    assert_close_resets::<EquityGrant>();
    assert_close_resets::<ManualEntry>();
    assert_close_resets::<AssetCategory>();
}

#[tokio::test]
async fn opening_a_modal_closes_the_others() {
    let page = cash_page(FakeApi::default());
    page.open_add_modal();
    page.open_view_modal(CashHolding::default());
    let state = page.snapshot();
    assert!(state.modals.view);
    assert!(!state.modals.add);
}

// ── Create ──────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn create_success_reloads_closes_and_messages() {
    let api = FakeApi::with_records(vec![]);
    let page = cash_page(api.clone());
    page.load_items().await.unwrap();
    page.open_add_modal();

    page.handle_create(json!({"account_name": "Brokerage cash", "current_balance": 250}))
        .await
        .unwrap();

    let state = page.snapshot();
    assert!(!state.modals.add);
    assert!(!state.submitting);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].account_name, "Brokerage cash");
    let message = state.message.unwrap();
    assert_eq!(message.kind, MessageKind::Success);
    assert_eq!(message.text, "Cash holding added successfully!");

    let creates = api.calls().iter().filter(|c| c.starts_with("create")).count();
    assert_eq!(creates, 1);
}

#[tokio::test]
async fn create_failure_keeps_modal_open() {
    let api = FakeApi::default();
    api.set(|s| s.fail_create = Some((400, Some("Account name is required".into()))));
    let page = cash_page(api);
    page.open_add_modal();

    let result = page.handle_create(json!({})).await;

    assert!(matches!(result, Err(CoreError::Backend { status: 400, .. })));
    let state = page.snapshot();
    assert!(state.modals.add);
    assert!(!state.submitting);
    let message = state.message.unwrap();
    assert_eq!(message.kind, MessageKind::Error);
    assert_eq!(message.text, "Account name is required");
}

#[tokio::test]
async fn create_failure_without_backend_text_uses_fallback() {
    let api = FakeApi::default();
    api.set(|s| s.fail_create = Some((500, None)));
    let page = cash_page(api);
    page.open_add_modal();

    page.handle_create(json!({})).await.unwrap_err();
    assert_eq!(page.snapshot().message.unwrap().text, "Failed to add cash holding");
}

#[tokio::test]
async fn unsupported_create_never_calls_backend() {
    let api = FakeApi::default();
    let config = AssetConfig::<CashHolding>::standard().with_capabilities(Capabilities::READ_ONLY);
    let page = CrudOrchestrator::new(api.clone(), config);

    let result = page.handle_create(json!({"account_name": "x"})).await;

    assert!(matches!(result, Err(CoreError::Unsupported { .. })));
    assert!(api.calls().is_empty());
}

// ── Update ──────────────────────────────────────────────────────────

#[tokio::test]
async fn update_without_selection_never_calls_backend() {
    let api = FakeApi::with_records(vec![cash(1, "Checking", 100.0)]);
    let page = cash_page(api.clone());

    let result = page.handle_update(json!({"current_balance": 1})).await;

    assert!(matches!(result, Err(CoreError::NoSelection { .. })));
    assert!(api.calls().iter().all(|c| !c.starts_with("update")));
}

#[tokio::test(start_paused = true)]
async fn update_targets_selected_item() {
    let api = FakeApi::with_records(vec![cash(1, "Checking", 100.0), cash(2, "Savings", 50.0)]);
    let page = cash_page(api.clone());
    page.load_items().await.unwrap();

    let savings = page.snapshot().items[1].clone();
    page.open_edit_modal(savings);
    page.handle_update(json!({"current_balance": 75})).await.unwrap();

    assert!(api.calls().contains(&"update 2".to_string()));
    let state = page.snapshot();
    assert!(!state.modals.edit);
    assert!(state.selected_item.is_none());
    assert!((state.items[1].current_balance - 75.0).abs() < f64::EPSILON);
    assert_eq!(state.message.unwrap().text, "Cash holding updated successfully!");
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_failure_sets_page_error_and_keeps_modal() {
    let api = FakeApi::with_records(vec![cash(1, "Checking", 100.0)]);
    api.set(|s| s.fail_delete = Some((409, None)));
    let page = cash_page(api);
    page.load_items().await.unwrap();

    let item = page.snapshot().items[0].clone();
    page.open_delete_modal(item);
    let result = page.handle_delete().await;

    assert!(result.is_err());
    let state = page.snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to delete cash holding"));
    assert!(state.modals.delete);
    assert!(state.message.is_none());
    assert!(!state.submitting);
}

#[tokio::test(start_paused = true)]
async fn delete_success_removes_item() {
    let api = FakeApi::with_records(vec![cash(1, "Checking", 100.0)]);
    let page = cash_page(api);
    page.load_items().await.unwrap();

    let item = page.snapshot().items[0].clone();
    page.open_delete_modal(item);
    page.handle_delete().await.unwrap();

    let state = page.snapshot();
    assert!(state.items.is_empty());
    assert!(!state.modals.delete);
    assert_eq!(state.message.unwrap().text, "Cash holding deleted successfully!");
}

// ── Messages, schema & view ─────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn success_message_clears_after_ttl() {
    let page = cash_page(FakeApi::default());
    page.open_add_modal();
    page.handle_create(json!({"account_name": "Cash"})).await.unwrap();
    assert!(page.snapshot().message.is_some());

    tokio::time::sleep(Duration::from_millis(2_999)).await;
    assert!(page.snapshot().message.is_some());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(page.snapshot().message.is_none());
}

#[tokio::test(start_paused = true)]
async fn newer_message_is_not_cleared_by_older_timer() {
    let api = FakeApi::default();
    let page = cash_page(api.clone());
    page.handle_create(json!({"account_name": "One"})).await.unwrap();

    tokio::time::sleep(Duration::from_millis(2_000)).await;
    api.set(|s| s.fail_create = Some((400, Some("Duplicate account".into()))));
    page.handle_create(json!({"account_name": "One"})).await.unwrap_err();

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    let message = page.snapshot().message.unwrap();
    assert_eq!(message.text, "Duplicate account");

    page.dismiss_message();
    assert!(page.snapshot().message.is_none());
}

#[tokio::test]
async fn category_schema_replaces_generic_schema() {
    let api = FakeApi::default();
    let page = cash_page(api.clone());
    page.load_schema().await.unwrap();
    page.load_schema_for_category(4).await.unwrap();

    assert_eq!(page.snapshot().schema.unwrap().name, "category-4");
    assert!(api.calls().contains(&"fetch_category_schema 4".to_string()));
}

#[tokio::test]
async fn pages_without_schema_skip_the_fetch() {
    let api = FakeApi::default();
    let page: CrudOrchestrator<AssetCategory, FakeApi> =
        CrudOrchestrator::new(api.clone(), AssetConfig::standard());
    page.initialize().await.unwrap();

    assert!(page.snapshot().schema.is_none());
    assert!(!api.calls().contains(&"fetch_schema".to_string()));
    assert_eq!(page.snapshot().view_mode, ViewMode::Cards);
}

#[tokio::test]
async fn view_mode_and_error_dismissal() {
    let api = FakeApi::default();
    api.set(|s| s.fail_fetch = true);
    let page = cash_page(api);
    page.load_items().await.unwrap_err();

    page.set_view_mode(ViewMode::Chart);
    page.dismiss_error();
    let state = page.snapshot();
    assert_eq!(state.view_mode, ViewMode::Chart);
    assert!(state.error.is_none());
}
