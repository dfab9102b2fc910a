// System endpoints: health and the downloadable OpenAPI document.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::HealthStatus;

impl ApiClient {
    /// `GET /health`
    pub async fn health(&self) -> Result<HealthStatus, Error> {
        self.get("health").await
    }

    /// `GET /api/v1/swagger/spec` as parsed JSON.
    pub async fn api_spec(&self) -> Result<Value, Error> {
        self.get("api/v1/swagger/spec").await
    }

    /// `GET /api/v1/swagger/spec` as the raw document, for saving to disk.
    pub async fn api_spec_raw(&self) -> Result<String, Error> {
        self.get_text("api/v1/swagger/spec").await
    }
}
