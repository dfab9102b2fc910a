// Wire types shared by every endpoint module.
//
// Asset payloads are NOT typed here: list and mutation endpoints return raw
// `serde_json::Value` so the core transformer can coerce loosely-typed
// records defensively. Only backend-declared descriptors (form schemas,
// plugins, health) get concrete types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Form schema ──────────────────────────────────────────────────────

/// Backend-declared description of a form for one asset / plugin type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

impl FormSchema {
    /// Look up a field by its name.
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A single field of a [`FormSchema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, alias = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl FormField {
    /// Label to display, falling back to the field name.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }
}

/// Input widget kind for a field.
///
/// Unknown type strings from the backend degrade to [`FieldType::Text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Currency,
    Percentage,
    Date,
    Select,
    Textarea,
    Checkbox,
    Email,
    Url,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Currency => "currency",
            Self::Percentage => "percentage",
            Self::Date => "date",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Email => "email",
            Self::Url => "url",
        }
    }

    /// Whether values of this type are sent as JSON numbers.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Currency | Self::Percentage)
    }
}

impl From<String> for FieldType {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "number" | "integer" | "int" | "float" | "decimal" => Self::Number,
            "currency" | "money" => Self::Currency,
            "percentage" | "percent" => Self::Percentage,
            "date" | "datetime" => Self::Date,
            "select" | "enum" | "dropdown" => Self::Select,
            "textarea" => Self::Textarea,
            "checkbox" | "boolean" | "bool" => Self::Checkbox,
            "email" => Self::Email,
            "url" => Self::Url,
            _ => Self::Text,
        }
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        t.as_str().to_owned()
    }
}

/// One choice of a select field. Accepts either a bare string or
/// a `{value, label}` object on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOption")]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOption {
    Plain(String),
    Labeled {
        value: Value,
        #[serde(default)]
        label: Option<String>,
    },
}

impl From<RawOption> for FieldOption {
    fn from(raw: RawOption) -> Self {
        match raw {
            RawOption::Plain(s) => Self {
                value: s.clone(),
                label: s,
            },
            RawOption::Labeled { value, label } => {
                let value = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                Self {
                    label: label.unwrap_or_else(|| value.clone()),
                    value,
                }
            }
        }
    }
}

/// Validation bounds for a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

// ── Plugins ──────────────────────────────────────────────────────────

/// Backend-declared manual-entry plugin descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub version: Option<String>,
}

fn default_true() -> bool {
    true
}

// ── Health ───────────────────────────────────────────────────────────

/// Response of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub database: Option<ServiceStatus>,
    #[serde(default)]
    pub plugins: Option<ServiceStatus>,
    #[serde(default)]
    pub price_service: Option<ServiceStatus>,
    #[serde(default)]
    pub market_status: Option<ServiceStatus>,
    #[serde(default)]
    pub crypto_service: Option<ServiceStatus>,
    #[serde(default)]
    pub property_service: Option<ServiceStatus>,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    /// Whether the overall status reports healthy.
    pub fn is_healthy(&self) -> bool {
        is_healthy_word(&self.status)
    }

    /// Named component statuses in display order, skipping absent ones.
    pub fn services(&self) -> Vec<(&'static str, &ServiceStatus)> {
        [
            ("Database", self.database.as_ref()),
            ("Plugins", self.plugins.as_ref()),
            ("Price service", self.price_service.as_ref()),
            ("Market", self.market_status.as_ref()),
            ("Crypto service", self.crypto_service.as_ref()),
            ("Property service", self.property_service.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, s)| s.map(|s| (name, s)))
        .collect()
    }
}

/// A component status: plain text (`"healthy"`), a `{status, message}`
/// object, or any other JSON the backend chose to send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceStatus {
    Text(String),
    Detailed {
        status: String,
        #[serde(default)]
        message: Option<String>,
    },
    Other(Value),
}

impl ServiceStatus {
    /// Short status word for display.
    pub fn label(&self) -> String {
        match self {
            Self::Text(s) | Self::Detailed { status: s, .. } => s.clone(),
            Self::Other(Value::Bool(b)) => if *b { "up" } else { "down" }.into(),
            Self::Other(v) => v.to_string(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        match self {
            Self::Text(s) | Self::Detailed { status: s, .. } => is_healthy_word(s),
            Self::Other(Value::Bool(b)) => *b,
            Self::Other(_) => true,
        }
    }
}

fn is_healthy_word(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "healthy" | "ok" | "up" | "connected" | "available" | "running" | "open" | "enabled"
    )
}

// ── Error body ───────────────────────────────────────────────────────

/// Shape of backend error responses: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schema_parses_mixed_option_shapes() {
        let schema: FormSchema = serde_json::from_value(json!({
            "name": "cash_holding",
            "fields": [
                {"name": "account_type", "type": "select", "label": "Type", "required": true,
                 "options": ["checking", {"value": "savings", "label": "Savings"}]},
                {"name": "current_balance", "type": "currency", "validation": {"min": 0}}
            ]
        }))
        .unwrap();

        let account_type = schema.field("account_type").unwrap();
        assert_eq!(account_type.field_type, FieldType::Select);
        let options = account_type.options.as_ref().unwrap();
        assert_eq!(options[0].label, "checking");
        assert_eq!(options[1].value, "savings");
        assert_eq!(options[1].label, "Savings");

        let balance = schema.field("current_balance").unwrap();
        assert!(balance.field_type.is_numeric());
        assert_eq!(balance.display_label(), "current_balance");
        assert_eq!(balance.validation.as_ref().unwrap().min, Some(0.0));
    }

    #[test]
    fn unknown_field_type_degrades_to_text() {
        let field: FormField =
            serde_json::from_value(json!({"name": "x", "type": "colorpicker"})).unwrap();
        assert_eq!(field.field_type, FieldType::Text);

        let field: FormField = serde_json::from_value(json!({"name": "y", "type": "boolean"})).unwrap();
        assert_eq!(field.field_type, FieldType::Checkbox);
    }

    #[test]
    fn health_tolerates_mixed_service_shapes() {
        let health: HealthStatus = serde_json::from_value(json!({
            "status": "healthy",
            "database": "connected",
            "price_service": {"status": "degraded", "message": "rate limited"},
            "plugins": {"loaded": 4},
            "version": "1.4.0"
        }))
        .unwrap();

        assert!(health.is_healthy());
        let services = health.services();
        assert_eq!(services.len(), 3);
        assert!(services[0].1.is_healthy());
        assert_eq!(services[1].1.label(), "{\"loaded\":4}");
        assert!(!services[2].1.is_healthy());
    }
}
