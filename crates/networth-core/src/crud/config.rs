// ── Per-asset page configuration ──

use serde_json::Value;

use crate::model::{AssetKind, AssetRecord, Transform};
use crate::transform;

use super::state::ViewMode;

/// Which operations a page offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub create: bool,
    pub update: bool,
    pub delete: bool,
    /// A backend form schema exists for this asset type.
    pub schema: bool,
}

impl Capabilities {
    pub const ALL: Self = Self {
        create: true,
        update: true,
        delete: true,
        schema: true,
    };

    pub const READ_ONLY: Self = Self {
        create: false,
        update: false,
        delete: false,
        schema: false,
    };
}

/// Everything that distinguishes one asset page from another.
#[derive(Debug, Clone)]
pub struct AssetConfig<T> {
    pub kind: AssetKind,
    /// Plural label used in load errors ("Failed to load <label>").
    pub label: String,
    /// Capitalized singular noun for success messages.
    pub noun: String,
    pub capabilities: Capabilities,
    /// `None` deserializes records directly.
    pub transform: Option<Transform<T>>,
    pub default_view: ViewMode,
}

impl<T: AssetRecord> AssetConfig<T> {
    /// The standard configuration for `T`'s asset kind.
    pub fn standard() -> Self {
        let kind = T::KIND;
        let default_view = match kind {
            AssetKind::RealEstate | AssetKind::Categories => ViewMode::Cards,
            _ => ViewMode::Table,
        };
        Self {
            kind,
            label: kind.label().to_owned(),
            noun: kind.noun().to_owned(),
            capabilities: Capabilities {
                schema: kind.plugin().is_some(),
                ..Capabilities::ALL
            },
            transform: T::transform(),
            default_view,
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Normalize a raw list payload into typed records.
    pub fn apply_transform(&self, raw: &Value) -> Vec<T> {
        match self.transform {
            Some(f) => f(raw),
            None => transform::passthrough(raw, self.kind.payload_key()),
        }
    }

    fn lower_noun(&self) -> String {
        self.noun.to_lowercase()
    }

    // ── Message text ─────────────────────────────────────────────────

    pub fn load_error(&self) -> String {
        format!("Failed to load {}", self.label)
    }

    pub fn created_message(&self) -> String {
        format!("{} added successfully!", self.noun)
    }

    pub fn updated_message(&self) -> String {
        format!("{} updated successfully!", self.noun)
    }

    pub fn deleted_message(&self) -> String {
        format!("{} deleted successfully!", self.noun)
    }

    pub fn create_fallback(&self) -> String {
        format!("Failed to add {}", self.lower_noun())
    }

    pub fn update_fallback(&self) -> String {
        format!("Failed to update {}", self.lower_noun())
    }

    pub fn delete_fallback(&self) -> String {
        format!("Failed to delete {}", self.lower_noun())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssetCategory, CashHolding, RealEstateProperty};

    #[test]
    fn standard_cash_config() {
        let config = AssetConfig::<CashHolding>::standard();
        assert_eq!(config.created_message(), "Cash holding added successfully!");
        assert_eq!(config.load_error(), "Failed to load cash holdings");
        assert_eq!(config.create_fallback(), "Failed to add cash holding");
        assert!(config.capabilities.schema);
        assert!(config.transform.is_some());
    }

    #[test]
    fn categories_pass_through_without_schema() {
        let config = AssetConfig::<AssetCategory>::standard();
        assert!(config.transform.is_none());
        assert!(!config.capabilities.schema);
        assert_eq!(config.default_view, ViewMode::Cards);

        let items = config.apply_transform(&serde_json::json!([{"id": 3, "name": "Art"}]));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn property_noun() {
        let config = AssetConfig::<RealEstateProperty>::standard();
        assert_eq!(config.deleted_message(), "Property deleted successfully!");
    }
}
