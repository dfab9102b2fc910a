// ── Common building blocks shared across the domain model ──

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::kind::AssetKind;

/// Backend-assigned integer identifier of an asset record.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AssetId(pub i64);

impl AssetId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for AssetId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalizes a raw list payload into typed records.
pub type Transform<T> = fn(&Value) -> Vec<T>;

/// A record managed by the generic CRUD orchestrator.
pub trait AssetRecord: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Which backend resource this record belongs to.
    const KIND: AssetKind;

    fn id(&self) -> AssetId;

    /// Short human-readable name for lists and confirmations.
    fn display_name(&self) -> String;

    /// Current market value in the record's currency. Zero when unknown.
    fn market_value(&self) -> f64;

    /// Payload transformer for this record type.
    ///
    /// `None` means the payload already matches the serde shape and is
    /// deserialized record by record.
    fn transform() -> Option<Transform<Self>> {
        None
    }
}
