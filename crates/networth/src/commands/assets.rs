//! Asset record handlers: list, show, add, update, delete.
//!
//! Every handler drives the same `CrudOrchestrator` the TUI pages use, so
//! the success and failure texts match what the dashboard shows.

use std::cmp::Ordering;
use std::time::Duration;

use serde_json::Value;
use tracing::warn;

use networth_api::ApiClient;
use networth_core::{AssetRecord, FormData, HttpOrchestrator, SchemaExt, http_orchestrator};

use crate::cli::{AddArgs, GlobalOpts, ListArgs, SortKey, UpdateArgs};
use crate::error::CliError;
use crate::output;

use super::rows::RecordView;
use super::util;

/// Server-managed fields never sent back on update.
const READ_ONLY_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

fn open_page<T: AssetRecord>(client: ApiClient, ttl: Duration) -> HttpOrchestrator<T> {
    http_orchestrator::<T>(client, ttl)
}

/// Load the page and pick out record `id`.
async fn find<T: AssetRecord>(page: &HttpOrchestrator<T>, id: i64) -> Result<T, CliError> {
    page.load_items().await?;
    page.snapshot()
        .items
        .into_iter()
        .find(|item| item.id().get() == id)
        .ok_or_else(|| CliError::NotFound {
            resource: format!("{} {id}", T::KIND.noun()),
            kind: T::KIND.to_string(),
        })
}

/// Print the outcome of a mutation: the success message, plus a warning
/// when the follow-up reload failed.
fn report<T: AssetRecord>(page: &HttpOrchestrator<T>, global: &GlobalOpts) {
    let state = page.snapshot();
    if let Some(message) = state.message {
        output::notice(&message.text, global.quiet);
    }
    if let Some(error) = state.error {
        warn!(%error, "reload after change failed");
    }
}

// ── List / Show ─────────────────────────────────────────────────────

fn compare<T: AssetRecord>(a: &T, b: &T, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id().cmp(&b.id()),
        SortKey::Name => a.display_name().cmp(&b.display_name()),
        SortKey::Value => b.market_value().total_cmp(&a.market_value()),
    }
}

pub async fn list<T: RecordView>(
    client: ApiClient,
    ttl: Duration,
    args: &ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let page = open_page::<T>(client, ttl);
    page.load_items().await?;

    let mut items = page.snapshot().items;
    items.sort_by(|a, b| compare(a, b, args.sort));
    if let Some(limit) = args.limit {
        items.truncate(limit);
    }

    let color = output::should_color(global.color);
    let out = output::render_list(
        global.output,
        &items,
        |item| item.row(color),
        |item| item.id().to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn show<T: RecordView>(
    client: ApiClient,
    ttl: Duration,
    id: i64,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let page = open_page::<T>(client, ttl);
    let item = find(&page, id).await?;
    let out = output::render_single(
        global.output,
        &item,
        |item| output::detail_block(&item.detail()),
        |item| item.id().to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Add / Update ────────────────────────────────────────────────────

pub async fn add<T: RecordView>(
    client: ApiClient,
    ttl: Duration,
    args: &AddArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let page = open_page::<T>(client, ttl);

    // A missing schema only costs local validation; the backend still checks.
    let schema_result = match args.category {
        Some(category_id) => page.load_schema_for_category(category_id).await,
        None => page.load_schema().await,
    };
    if let Err(e) = schema_result {
        warn!(error = %e, "continuing without form schema");
    }
    let schema = page.snapshot().schema;

    let mut data: FormData = schema.as_ref().map(SchemaExt::defaults).unwrap_or_default();
    data.extend(util::base_payload(&args.payload)?);
    data.extend(
        util::parse_sets(schema.as_ref(), &args.payload.fields).map_err(util::with_kind::<T>)?,
    );
    if let Some(category_id) = args.category {
        data.entry("category_id").or_insert(Value::from(category_id));
    }

    if let Some(ref schema) = schema {
        let errors = schema.validate(&data);
        if !errors.is_empty() {
            return Err(util::form_error::<T>(&errors));
        }
    }

    page.open_add_modal();
    page.handle_create(Value::Object(data)).await?;
    report(&page, global);
    Ok(())
}

pub async fn update<T: RecordView>(
    client: ApiClient,
    ttl: Duration,
    args: &UpdateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let page = open_page::<T>(client, ttl);
    let item = find(&page, args.id).await?;
    if let Err(e) = page.load_schema().await {
        warn!(error = %e, "continuing without form schema");
    }
    let schema = page.snapshot().schema;

    let mut changes = util::base_payload(&args.payload)?;
    changes.extend(
        util::parse_sets(schema.as_ref(), &args.payload.fields).map_err(util::with_kind::<T>)?,
    );
    if changes.is_empty() {
        return Err(CliError::Validation {
            field: "update".into(),
            reason: "nothing to change; pass --data, --file or --set".into(),
        });
    }

    // Start from the current record so the backend receives a full body.
    let mut data = match serde_json::to_value(&item)? {
        Value::Object(map) => map,
        _ => FormData::new(),
    };
    for key in READ_ONLY_FIELDS {
        data.remove(key);
    }
    let touched: Vec<String> = changes.keys().cloned().collect();
    data.extend(changes);

    // Only complain about fields this invocation changed.
    if let Some(ref schema) = schema {
        let errors: Vec<_> = schema
            .validate(&data)
            .into_iter()
            .filter(|e| touched.contains(&e.field))
            .collect();
        if !errors.is_empty() {
            return Err(util::form_error::<T>(&errors));
        }
    }

    page.open_edit_modal(item);
    page.handle_update(Value::Object(data)).await?;
    report(&page, global);
    Ok(())
}

// ── Delete ──────────────────────────────────────────────────────────

pub async fn delete<T: RecordView>(
    client: ApiClient,
    ttl: Duration,
    id: i64,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let page = open_page::<T>(client, ttl);
    let item = find(&page, id).await?;

    let prompt = format!(
        "Delete {} '{}'? This cannot be undone.",
        T::KIND.noun().to_lowercase(),
        item.display_name()
    );
    if !util::confirm(&prompt, global.yes)? {
        return Ok(());
    }

    page.open_delete_modal(item);
    page.handle_delete().await?;
    report(&page, global);
    Ok(())
}
