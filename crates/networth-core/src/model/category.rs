// ── Asset categories ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{AssetId, AssetRecord};
use super::kind::AssetKind;

/// A user-defined grouping for manual entries.
///
/// Category payloads already match this shape, so no transformer is
/// configured: records deserialize directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetCategory {
    pub id: AssetId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_type: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AssetRecord for AssetCategory {
    const KIND: AssetKind = AssetKind::Categories;

    fn id(&self) -> AssetId {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    /// Categories carry no value of their own.
    fn market_value(&self) -> f64 {
        0.0
    }
}
