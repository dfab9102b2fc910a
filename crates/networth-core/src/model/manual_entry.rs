// ── Manual entries ──
//
// Free-form records created through backend plugins. The plugin named by
// `entry_type` owns the shape of `data`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{AssetId, AssetRecord, Transform};
use super::kind::AssetKind;
use crate::transform;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualEntry {
    pub id: AssetId,
    /// Name of the plugin that created the entry.
    pub entry_type: String,
    pub account_id: Option<i64>,
    pub category_id: Option<i64>,
    pub data: Map<String, Value>,
    pub description: Option<String>,
    pub amount: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ManualEntry {
    /// Composite key that identifies an entry across duplicated payload rows.
    pub fn dedupe_key(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.entry_type,
            self.id,
            self.account_id.map(|a| a.to_string()).unwrap_or_default(),
            self.created_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        )
    }
}

impl AssetRecord for ManualEntry {
    const KIND: AssetKind = AssetKind::ManualEntries;

    fn id(&self) -> AssetId {
        self.id
    }

    fn display_name(&self) -> String {
        match &self.description {
            Some(d) if !d.is_empty() => d.clone(),
            _ => format!("{} #{}", self.entry_type, self.id),
        }
    }

    fn market_value(&self) -> f64 {
        self.amount
    }

    fn transform() -> Option<Transform<Self>> {
        Some(transform::manual_entries)
    }
}
