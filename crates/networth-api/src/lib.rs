// networth-api: Async Rust client for the networth backend REST API

pub mod client;
pub mod error;
pub mod resources;
pub mod system;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{
    FieldOption, FieldType, FieldValidation, FormField, FormSchema, HealthStatus, PluginInfo,
    ServiceStatus,
};
