//! Validate invocation arguments against a tool's parameter contract.

/// Validate arguments against a JSON Schema parameter contract.
///
/// Checks the schema type, required-field presence, per-property types, the
/// `date-time` string format, and integer `minimum` bounds. Returns
/// `Ok(())` when valid, `Err(message)` describing the first violation.
pub fn validate_arguments(
    args: &serde_json::Value,
    schema: &serde_json::Value,
) -> Result<(), String> {
    if let Some(schema_type) = schema.get("type").and_then(|v| v.as_str()) {
        if schema_type == "object" && !args.is_object() {
            return Err(format!(
                "expected object arguments, got {}",
                json_type_name(args)
            ));
        }
    }

    let obj = match args.as_object() {
        Some(obj) => obj,
        None => return Ok(()),
    };

    if let Some(required) = schema.get("required").and_then(|v| v.as_array()) {
        for field in required.iter().filter_map(|f| f.as_str()) {
            if !obj.contains_key(field) {
                return Err(format!("missing required field '{field}'"));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(|v| v.as_object()) {
        for (key, value) in obj {
            if let Some(prop_schema) = properties.get(key) {
                check_property(key, value, prop_schema)?;
            }
        }
    }

    Ok(())
}

/// Check a single property value against its schema entry.
fn check_property(
    key: &str,
    value: &serde_json::Value,
    prop_schema: &serde_json::Value,
) -> Result<(), String> {
    if let Some(expected) = prop_schema.get("type").and_then(|v| v.as_str()) {
        if !value_matches_type(value, expected) {
            return Err(format!(
                "field '{}' expected type '{}', got {}",
                key,
                expected,
                json_type_name(value)
            ));
        }
    }

    if let Some(format) = prop_schema.get("format").and_then(|v| v.as_str()) {
        if format == "date-time" {
            let raw = value.as_str().unwrap_or_default();
            if chrono::DateTime::parse_from_rfc3339(raw).is_err() {
                return Err(format!(
                    "field '{key}' is not a valid ISO 8601 date-time: '{raw}'"
                ));
            }
        }
    }

    if let Some(minimum) = prop_schema.get("minimum").and_then(|v| v.as_i64()) {
        if let Some(n) = value.as_i64() {
            if n < minimum {
                return Err(format!("field '{key}' must be at least {minimum}, got {n}"));
            }
        }
    }

    Ok(())
}

fn value_matches_type(value: &serde_json::Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        _ => true,
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ToolName, ToolSchema};
    use serde_json::json;

    fn book_event_schema() -> serde_json::Value {
        ToolSchema::new()
            .spec(ToolName::BookEvent)
            .parameters
            .schema
            .clone()
    }

    fn cancel_event_schema() -> serde_json::Value {
        ToolSchema::new()
            .spec(ToolName::CancelEvent)
            .parameters
            .schema
            .clone()
    }

    #[test]
    fn accepts_valid_book_event_arguments() {
        let args = json!({
            "start_time": "2030-08-15T14:00:00Z",
            "attendee_name": "Alice",
            "reason": "quarterly sync",
        });
        assert!(validate_arguments(&args, &book_event_schema()).is_ok());
    }

    #[test]
    fn rejects_missing_required_field() {
        let args = json!({"start_time": "2030-08-15T14:00:00Z", "attendee_name": "Alice"});
        let err = validate_arguments(&args, &book_event_schema()).unwrap_err();
        assert!(err.contains("missing required field 'reason'"));
    }

    #[test]
    fn rejects_non_object_arguments() {
        let err = validate_arguments(&json!("not an object"), &book_event_schema()).unwrap_err();
        assert!(err.contains("expected object"));
    }

    #[test]
    fn rejects_malformed_date_time() {
        let args = json!({
            "start_time": "tomorrow at noon",
            "attendee_name": "Alice",
            "reason": "sync",
        });
        let err = validate_arguments(&args, &book_event_schema()).unwrap_err();
        assert!(err.contains("date-time"));
    }

    #[test]
    fn rejects_wrong_type() {
        let args = json!({"booking_id": "5"});
        let err = validate_arguments(&args, &cancel_event_schema()).unwrap_err();
        assert!(err.contains("expected type 'integer'"));
    }

    #[test]
    fn rejects_non_positive_booking_id() {
        let err = validate_arguments(&json!({"booking_id": 0}), &cancel_event_schema())
            .unwrap_err();
        assert!(err.contains("at least 1"));

        let err = validate_arguments(&json!({"booking_id": -3}), &cancel_event_schema())
            .unwrap_err();
        assert!(err.contains("at least 1"));
    }

    #[test]
    fn accepts_extra_fields_not_in_schema() {
        let args = json!({"booking_id": 5, "extra": true});
        assert!(validate_arguments(&args, &cancel_event_schema()).is_ok());
    }

    #[test]
    fn empty_schema_accepts_empty_object() {
        let schema = crate::tools::ToolParameters::empty().schema;
        assert!(validate_arguments(&json!({}), &schema).is_ok());
    }
}
