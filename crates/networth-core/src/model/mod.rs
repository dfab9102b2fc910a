// ── Domain model ──
//
// Typed representations of the backend's asset records. Instances are
// produced by the transformers in `crate::transform`, which coerce the
// loosely-typed JSON payloads defensively.

pub mod category;
pub mod common;
pub mod equity;
pub mod holdings;
pub mod kind;
pub mod manual_entry;
pub mod real_estate;

// ── Re-exports ──────────────────────────────────────────────────────

pub use category::AssetCategory;
pub use common::{AssetId, AssetRecord, Transform};
pub use equity::EquityGrant;
pub use holdings::{CashHolding, CryptoHolding, StockHolding};
pub use kind::AssetKind;
pub use manual_entry::ManualEntry;
pub use real_estate::RealEstateProperty;
