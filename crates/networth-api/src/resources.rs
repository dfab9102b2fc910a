// Asset resource and form-schema endpoints.
//
// List and mutation payloads stay as raw JSON: the backend is loosely typed
// and normalization is the core transformer's job.

use serde_json::Value;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{FormSchema, PluginInfo};

const API_PREFIX: &str = "api/v1";

impl ApiClient {
    // ── Asset resources ──────────────────────────────────────────────

    /// `GET /api/v1/{resource}`: the raw list payload.
    pub async fn list_resource(&self, resource: &str) -> Result<Value, Error> {
        self.get(&format!("{API_PREFIX}/{resource}")).await
    }

    /// `GET /api/v1/{resource}/{id}`
    pub async fn get_resource(&self, resource: &str, id: i64) -> Result<Value, Error> {
        self.get(&format!("{API_PREFIX}/{resource}/{id}")).await
    }

    /// `POST /api/v1/{resource}`: returns the created record.
    pub async fn create_resource(&self, resource: &str, body: &Value) -> Result<Value, Error> {
        self.post(&format!("{API_PREFIX}/{resource}"), body).await
    }

    /// `PUT /api/v1/{resource}/{id}`: returns the updated record.
    pub async fn update_resource(
        &self,
        resource: &str,
        id: i64,
        body: &Value,
    ) -> Result<Value, Error> {
        self.put(&format!("{API_PREFIX}/{resource}/{id}"), body).await
    }

    /// `DELETE /api/v1/{resource}/{id}`
    pub async fn delete_resource(&self, resource: &str, id: i64) -> Result<(), Error> {
        self.delete(&format!("{API_PREFIX}/{resource}/{id}")).await
    }

    // ── Schemas & plugins ────────────────────────────────────────────

    /// `GET /api/v1/plugins/{plugin}/schema`
    pub async fn plugin_schema(&self, plugin: &str) -> Result<FormSchema, Error> {
        let raw: Value = self
            .get(&format!("{API_PREFIX}/plugins/{plugin}/schema"))
            .await?;
        decode_schema(raw)
    }

    /// `GET /api/v1/asset-categories/{id}/schema`
    pub async fn category_schema(&self, category_id: i64) -> Result<FormSchema, Error> {
        let raw: Value = self
            .get(&format!("{API_PREFIX}/asset-categories/{category_id}/schema"))
            .await?;
        decode_schema(raw)
    }

    /// `GET /api/v1/plugins`: accepts a bare array or `{"plugins": [...]}`.
    pub async fn plugins(&self) -> Result<Vec<PluginInfo>, Error> {
        let raw: Value = self.get(&format!("{API_PREFIX}/plugins")).await?;
        let list = match raw {
            Value::Object(mut map) => map.remove("plugins").unwrap_or(Value::Array(Vec::new())),
            other => other,
        };
        serde_json::from_value(list.clone()).map_err(|e| Error::Deserialization {
            message: format!("invalid plugin list: {e}"),
            body: list.to_string(),
        })
    }
}

/// Schemas arrive either bare or wrapped as `{"schema": {...}}`.
fn decode_schema(raw: Value) -> Result<FormSchema, Error> {
    let inner = match raw {
        Value::Object(mut map) if map.contains_key("schema") && !map.contains_key("fields") => {
            debug!("unwrapping enveloped form schema");
            map.remove("schema").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(inner.clone()).map_err(|e| Error::Deserialization {
        message: format!("invalid form schema: {e}"),
        body: inner.to_string(),
    })
}
