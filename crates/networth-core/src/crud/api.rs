// ── API seam for the orchestrator ──
//
// The orchestrator only needs six calls per asset type. Keeping them behind
// a trait lets tests drive the orchestrator with an in-memory fake while
// production goes through `HttpAssetApi`.

use std::future::Future;

use serde_json::Value;

use networth_api::{ApiClient, FormSchema};

use crate::error::CoreError;
use crate::model::{AssetId, AssetKind};

/// Backend operations for one asset type.
pub trait AssetApi: Send + Sync + 'static {
    /// Raw list payload.
    fn fetch_all(&self) -> impl Future<Output = Result<Value, CoreError>> + Send;

    fn create(&self, body: &Value) -> impl Future<Output = Result<Value, CoreError>> + Send;

    fn update(
        &self,
        id: AssetId,
        body: &Value,
    ) -> impl Future<Output = Result<Value, CoreError>> + Send;

    fn delete(&self, id: AssetId) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Generic form schema for this asset type.
    fn fetch_schema(&self) -> impl Future<Output = Result<FormSchema, CoreError>> + Send;

    /// Category-specific form schema.
    fn fetch_category_schema(
        &self,
        category_id: i64,
    ) -> impl Future<Output = Result<FormSchema, CoreError>> + Send;
}

/// [`AssetApi`] over the REST client.
#[derive(Clone)]
pub struct HttpAssetApi {
    client: ApiClient,
    kind: AssetKind,
}

impl HttpAssetApi {
    pub fn new(client: ApiClient, kind: AssetKind) -> Self {
        Self { client, kind }
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }
}

impl AssetApi for HttpAssetApi {
    async fn fetch_all(&self) -> Result<Value, CoreError> {
        Ok(self.client.list_resource(self.kind.resource()).await?)
    }

    async fn create(&self, body: &Value) -> Result<Value, CoreError> {
        Ok(self.client.create_resource(self.kind.resource(), body).await?)
    }

    async fn update(&self, id: AssetId, body: &Value) -> Result<Value, CoreError> {
        Ok(self
            .client
            .update_resource(self.kind.resource(), id.get(), body)
            .await?)
    }

    async fn delete(&self, id: AssetId) -> Result<(), CoreError> {
        Ok(self.client.delete_resource(self.kind.resource(), id.get()).await?)
    }

    async fn fetch_schema(&self) -> Result<FormSchema, CoreError> {
        let Some(plugin) = self.kind.plugin() else {
            return Err(CoreError::Unsupported {
                operation: "schema".into(),
                asset: self.kind.label().into(),
            });
        };
        Ok(self.client.plugin_schema(plugin).await?)
    }

    async fn fetch_category_schema(&self, category_id: i64) -> Result<FormSchema, CoreError> {
        Ok(self.client.category_schema(category_id).await?)
    }
}
