//! Shared helpers for command handlers.

use std::path::Path;

use serde_json::Value;

use networth_core::schema::coerce;
use networth_core::{AssetRecord, FieldError, FormData, FormSchema};

use crate::cli::PayloadArgs;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--file` flags.
pub fn read_json_file(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// The JSON object given through `--data` or `--file`, or an empty one.
pub fn base_payload(args: &PayloadArgs) -> Result<FormData, CliError> {
    let value = match (&args.data, &args.file) {
        (Some(raw), _) => serde_json::from_str(raw)?,
        (None, Some(path)) => read_json_file(path)?,
        (None, None) => return Ok(FormData::new()),
    };
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CliError::Validation {
            field: "data".into(),
            reason: format!("expected a JSON object, got {other}"),
        }),
    }
}

/// Guess a JSON value for text with no schema to go by: numbers, booleans
/// and `null` keep their JSON meaning, anything else is a string.
fn infer(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(v @ (Value::Number(_) | Value::Bool(_) | Value::Null)) => v,
        _ => Value::String(raw.to_owned()),
    }
}

/// Parse `--set FIELD=VALUE` pairs, coercing through the schema when the
/// field is declared in it.
pub fn parse_sets(schema: Option<&FormSchema>, sets: &[String]) -> Result<FormData, CliError> {
    let mut data = FormData::new();
    let mut problems = Vec::new();

    for pair in sets {
        let Some((name, raw)) = pair.split_once('=') else {
            return Err(CliError::Validation {
                field: "set".into(),
                reason: format!("expected FIELD=VALUE, got '{pair}'"),
            });
        };
        let name = name.trim();
        let field = schema.and_then(|s| s.field(name));
        match field.map(|f| coerce(f, raw)) {
            Some(Ok(value)) => {
                data.insert(name.to_owned(), value);
            }
            Some(Err(e)) => problems.push(e.to_string()),
            None => {
                data.insert(name.to_owned(), infer(raw.trim()));
            }
        }
    }

    if problems.is_empty() {
        Ok(data)
    } else {
        Err(CliError::InvalidForm {
            kind: String::new(),
            problems,
        })
    }
}

/// Turn field errors into a CLI error naming the asset kind.
pub fn form_error<T: AssetRecord>(errors: &[FieldError]) -> CliError {
    CliError::InvalidForm {
        kind: T::KIND.to_string(),
        problems: errors.iter().map(ToString::to_string).collect(),
    }
}

/// Re-tag a form error from `parse_sets` with the asset kind.
pub fn with_kind<T: AssetRecord>(err: CliError) -> CliError {
    match err {
        CliError::InvalidForm { problems, .. } => CliError::InvalidForm {
            kind: T::KIND.to_string(),
            problems,
        },
        other => other,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> FormSchema {
        serde_json::from_value(json!({
            "name": "cash_holding",
            "fields": [
                {"name": "current_balance", "type": "currency", "required": true},
                {"name": "account_name", "type": "text"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn sets_are_coerced_by_schema() {
        let sets = vec![
            "current_balance=$1,250".to_owned(),
            "account_name=Savings".to_owned(),
        ];
        let data = parse_sets(Some(&schema()), &sets).unwrap();
        assert_eq!(data["current_balance"], json!(1250));
        assert_eq!(data["account_name"], json!("Savings"));
    }

    #[test]
    fn unknown_fields_are_inferred() {
        let sets = vec!["shares=10".to_owned(), "symbol=AAPL".to_owned()];
        let data = parse_sets(None, &sets).unwrap();
        assert_eq!(data["shares"], json!(10));
        assert_eq!(data["symbol"], json!("AAPL"));
    }

    #[test]
    fn bad_numbers_are_reported() {
        let sets = vec!["current_balance=lots".to_owned()];
        let err = parse_sets(Some(&schema()), &sets).unwrap_err();
        assert!(matches!(err, CliError::InvalidForm { ref problems, .. } if problems.len() == 1));
    }

    #[test]
    fn missing_equals_is_rejected() {
        let err = parse_sets(None, &["oops".to_owned()]).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }
}
