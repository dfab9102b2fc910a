// ── Generic CRUD page logic ──
//
// Every asset page follows the same cycle: fetch, transform, render,
// submit, refresh. This module implements that cycle once, parameterized
// by an `AssetConfig` and an `AssetApi`.

pub mod api;
pub mod config;
pub mod orchestrator;
pub mod state;

pub use api::{AssetApi, HttpAssetApi};
pub use config::{AssetConfig, Capabilities};
pub use orchestrator::CrudOrchestrator;
pub use state::{CrudState, Message, MessageKind, ModalFlags, ModalKind, ViewMode};

use std::time::Duration;

use networth_api::ApiClient;

use crate::model::AssetRecord;

/// Orchestrator talking to the real backend.
pub type HttpOrchestrator<T> = CrudOrchestrator<T, HttpAssetApi>;

/// Standard orchestrator for `T` over `client`.
pub fn http_orchestrator<T: AssetRecord>(client: ApiClient, message_ttl: Duration) -> HttpOrchestrator<T> {
    let api = HttpAssetApi::new(client, T::KIND);
    CrudOrchestrator::with_message_ttl(api, AssetConfig::standard(), message_ttl)
}
