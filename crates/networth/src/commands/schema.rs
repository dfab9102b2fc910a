//! Schema and plugin handlers.

use std::time::Duration;

use tabled::Tabled;

use networth_api::ApiClient;
use networth_core::{
    AssetRecord, FormField, FormSchema, HttpOrchestrator, ManualEntry, PluginInfo,
    http_orchestrator,
};

use crate::cli::{GlobalOpts, OutputFormat, SchemaArgs};
use crate::error::CliError;
use crate::output;

use super::with_record_type;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    name: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Type")]
    field_type: &'static str,
    #[tabled(rename = "Required")]
    required: &'static str,
    #[tabled(rename = "Choices / Limits")]
    constraints: String,
}

fn constraints(field: &FormField) -> String {
    if let Some(ref options) = field.options {
        return options
            .iter()
            .map(|o| o.value.as_str())
            .collect::<Vec<_>>()
            .join(", ");
    }
    let Some(ref v) = field.validation else {
        return String::new();
    };
    let mut parts = Vec::new();
    if let Some(min) = v.min {
        parts.push(format!("min {min}"));
    }
    if let Some(max) = v.max {
        parts.push(format!("max {max}"));
    }
    if let Some(len) = v.max_length {
        parts.push(format!("max length {len}"));
    }
    parts.join(", ")
}

impl From<&FormField> for FieldRow {
    fn from(f: &FormField) -> Self {
        Self {
            name: f.name.clone(),
            label: f.display_label().to_owned(),
            field_type: f.field_type.as_str(),
            required: if f.required { "yes" } else { "" },
            constraints: constraints(f),
        }
    }
}

#[derive(Tabled)]
struct PluginRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: &'static str,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&PluginInfo> for PluginRow {
    fn from(p: &PluginInfo) -> Self {
        Self {
            name: p.name.clone(),
            enabled: if p.enabled { "yes" } else { "no" },
            version: p.version.clone().unwrap_or_default(),
            description: p.description.clone().unwrap_or_default(),
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

fn print_schema(schema: &FormSchema, global: &GlobalOpts) -> Result<(), CliError> {
    let out = match global.output {
        OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml => output::render_single(
            global.output,
            schema,
            |_| String::new(),
            |s| s.name.clone(),
        )?,
        OutputFormat::Table | OutputFormat::Plain => output::render_list(
            global.output,
            &schema.fields,
            |f| FieldRow::from(f),
            |f| f.name.clone(),
        )?,
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn kind_schema<T: AssetRecord>(
    client: ApiClient,
    ttl: Duration,
) -> Result<FormSchema, CliError> {
    let page: HttpOrchestrator<T> = http_orchestrator(client, ttl);
    if !page.config().capabilities.schema {
        return Err(CliError::Unsupported {
            operation: "form schema".into(),
            asset: format!("{} (pass --category <ID> for a category schema)", T::KIND.label()),
        });
    }
    page.load_schema().await?;
    page.snapshot().schema.ok_or_else(|| CliError::InvalidData {
        message: "backend returned no schema".into(),
    })
}

async fn category_schema(
    client: ApiClient,
    ttl: Duration,
    category_id: i64,
) -> Result<FormSchema, CliError> {
    let page: HttpOrchestrator<ManualEntry> = http_orchestrator(client, ttl);
    page.load_schema_for_category(category_id).await?;
    page.snapshot().schema.ok_or_else(|| CliError::InvalidData {
        message: "backend returned no schema".into(),
    })
}

pub async fn handle(
    client: ApiClient,
    ttl: Duration,
    args: SchemaArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let schema = match (args.category, args.kind) {
        (Some(category_id), _) => category_schema(client, ttl, category_id).await?,
        (None, Some(kind)) => with_record_type!(kind, T => kind_schema::<T>(client, ttl).await?),
        (None, None) => {
            return Err(CliError::Validation {
                field: "schema".into(),
                reason: "name an asset type or pass --category".into(),
            });
        }
    };
    print_schema(&schema, global)
}

pub async fn plugins(client: &ApiClient, global: &GlobalOpts) -> Result<(), CliError> {
    let plugins = client.plugins().await.map_err(networth_core::CoreError::from)?;
    let out = output::render_list(
        global.output,
        &plugins,
        |p| PluginRow::from(p),
        |p| p.name.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
