// ── Form schema validation and input coercion ──
//
// Schemas come from the backend (`networth_api::FormSchema`). Renderers
// collect raw text per field; `coerce` turns that text into typed JSON and
// `validate` checks a complete form before it is submitted.

use chrono::NaiveDate;
use serde_json::{Map, Number, Value};

use networth_api::{FieldType, FormField, FormSchema};

/// Submitted form values keyed by field name.
pub type FormData = Map<String, Value>;

/// A problem with one field of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &FormField, message: impl Into<String>) -> Self {
        Self {
            field: field.name.clone(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Turn raw text input for `field` into the JSON value the backend expects.
///
/// Blank input becomes `null` (required-ness is checked by `validate`).
pub fn coerce(field: &FormField, raw: &str) -> Result<Value, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() && field.field_type != FieldType::Checkbox {
        return Ok(Value::Null);
    }

    match field.field_type {
        FieldType::Number | FieldType::Currency | FieldType::Percentage => {
            let cleaned: String = raw
                .chars()
                .filter(|c| !matches!(c, ',' | '$' | '%' | ' '))
                .collect();
            if let Ok(i) = cleaned.parse::<i64>() {
                return Ok(Value::from(i));
            }
            cleaned
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| FieldError::new(field, format!("\"{raw}\" is not a number")))
        }
        FieldType::Checkbox => match raw.to_ascii_lowercase().as_str() {
            "" | "false" | "no" | "n" | "0" | "off" => Ok(Value::Bool(false)),
            "true" | "yes" | "y" | "1" | "on" | "x" => Ok(Value::Bool(true)),
            _ => Err(FieldError::new(field, "expected yes or no")),
        },
        FieldType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
            .map_err(|_| FieldError::new(field, "expected a date as YYYY-MM-DD")),
        FieldType::Select => match &field.options {
            Some(options) => options
                .iter()
                .find(|o| o.value == raw || o.label.eq_ignore_ascii_case(raw))
                .map(|o| Value::String(o.value.clone()))
                .ok_or_else(|| FieldError::new(field, format!("\"{raw}\" is not one of the choices"))),
            None => Ok(Value::String(raw.to_owned())),
        },
        FieldType::Email if !raw.contains('@') => {
            Err(FieldError::new(field, "expected an email address"))
        }
        FieldType::Url if url::Url::parse(raw).is_err() => {
            Err(FieldError::new(field, "expected a URL"))
        }
        _ => Ok(Value::String(raw.to_owned())),
    }
}

/// Validation and defaults on top of the backend-declared schema.
pub trait SchemaExt {
    /// Every problem with `data`, in field order. Empty means valid.
    fn validate(&self, data: &FormData) -> Vec<FieldError>;

    /// Coerce raw `(field, text)` inputs and validate the result.
    fn build_form<'a, I>(&self, inputs: I) -> Result<FormData, Vec<FieldError>>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>;

    /// Like [`build_form`](Self::build_form), for an edit of `original`: a
    /// field that had a value and is now blank is sent as an explicit `null`
    /// so the backend clears it.
    fn build_update<'a, I>(
        &self,
        inputs: I,
        original: &FormData,
    ) -> Result<FormData, Vec<FieldError>>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>;

    /// Backend-declared default values.
    fn defaults(&self) -> FormData;
}

impl SchemaExt for FormSchema {
    fn validate(&self, data: &FormData) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|field| check_field(field, data.get(&field.name)))
            .collect()
    }

    fn build_form<'a, I>(&self, inputs: I) -> Result<FormData, Vec<FieldError>>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        collect_inputs(self, inputs, None)
    }

    fn build_update<'a, I>(
        &self,
        inputs: I,
        original: &FormData,
    ) -> Result<FormData, Vec<FieldError>>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        collect_inputs(self, inputs, Some(original))
    }

    fn defaults(&self) -> FormData {
        self.fields
            .iter()
            .filter_map(|f| f.default_value.clone().map(|v| (f.name.clone(), v)))
            .collect()
    }
}

fn collect_inputs<'a, I>(
    schema: &FormSchema,
    inputs: I,
    original: Option<&FormData>,
) -> Result<FormData, Vec<FieldError>>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut data = FormData::new();
    let mut errors = Vec::new();
    for (name, raw) in inputs {
        let coerced = match schema.field(name) {
            Some(field) => coerce(field, raw),
            // Unknown to the schema: pass through as text.
            None => Ok(Value::String(raw.trim().to_owned())),
        };
        match coerced {
            Ok(Value::Null) => {
                if original.is_some_and(|o| !is_blank(o.get(name))) {
                    data.insert(name.to_owned(), Value::Null);
                }
            }
            Ok(value) => {
                data.insert(name.to_owned(), value);
            }
            Err(e) => errors.push(e),
        }
    }
    if errors.is_empty() {
        errors = schema.validate(&data);
    }
    if errors.is_empty() { Ok(data) } else { Err(errors) }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

fn check_field(field: &FormField, value: Option<&Value>) -> Option<FieldError> {
    let label = field.display_label();
    if is_blank(value) {
        return field
            .required
            .then(|| FieldError::new(field, format!("{label} is required")));
    }
    let value = value?;

    if field.field_type.is_numeric() {
        let Some(n) = crate::transform::opt_number(Some(value)) else {
            return Some(FieldError::new(field, format!("{label} must be a number")));
        };
        if let Some(rules) = &field.validation {
            if let Some(min) = rules.min.filter(|min| n < *min) {
                return Some(FieldError::new(field, format!("{label} must be at least {min}")));
            }
            if let Some(max) = rules.max.filter(|max| n > *max) {
                return Some(FieldError::new(field, format!("{label} must be at most {max}")));
            }
        }
    }

    if let (Value::String(s), Some(rules)) = (value, &field.validation) {
        let len = s.chars().count();
        if let Some(min) = rules.min_length.filter(|min| len < *min) {
            return Some(FieldError::new(
                field,
                format!("{label} must be at least {min} characters"),
            ));
        }
        if let Some(max) = rules.max_length.filter(|max| len > *max) {
            return Some(FieldError::new(
                field,
                format!("{label} must be at most {max} characters"),
            ));
        }
    }

    if field.field_type == FieldType::Select {
        if let (Some(options), Value::String(s)) = (&field.options, value) {
            if !options.iter().any(|o| &o.value == s) {
                return Some(FieldError::new(field, format!("{label} has an unknown choice")));
            }
        }
    }

    None
}
