// networth-core: domain model, payload transformers and the generic CRUD
// orchestrator shared by the networth CLI and TUI.

pub mod chart;
pub mod config;
pub mod crud;
pub mod dedupe;
pub mod error;
pub mod model;
pub mod schema;
pub mod summary;
pub mod transform;

// ── Primary re-exports ──────────────────────────────────────────────
pub use chart::{ChartError, ChartPoint, ChartSeries};
pub use config::{BackendConfig, DEFAULT_MESSAGE_TTL, TlsVerification};
pub use crud::{
    AssetApi, AssetConfig, Capabilities, CrudOrchestrator, CrudState, HttpAssetApi,
    HttpOrchestrator, Message, MessageKind, ModalFlags, ModalKind, ViewMode, http_orchestrator,
};
pub use dedupe::dedupe_manual_entries;
pub use error::CoreError;
pub use schema::{FieldError, FormData, SchemaExt};
pub use summary::NetWorthSummary;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AssetCategory, AssetId, AssetKind, AssetRecord, CashHolding, CryptoHolding, EquityGrant,
    ManualEntry, RealEstateProperty, StockHolding,
};

// Backend-declared descriptors pass through unchanged.
pub use networth_api::{FieldType, FormField, FormSchema, HealthStatus, PluginInfo};
