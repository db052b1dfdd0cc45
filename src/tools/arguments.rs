//! Typed access to tool invocation arguments.

use crate::error::CalChatError;

/// Wrapper around invocation arguments providing typed extraction.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// Get the raw JSON value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.value
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, CalChatError> {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| CalChatError::InvalidArgument(format!("missing string argument '{key}'")))
    }

    /// Get an integer argument.
    pub fn get_i64(&self, key: &str) -> Result<i64, CalChatError> {
        self.value
            .get(key)
            .and_then(|v| v.as_i64())
            .ok_or_else(|| {
                CalChatError::InvalidArgument(format!("missing integer argument '{key}'"))
            })
    }

    /// Deserialize the entire arguments into a typed struct.
    ///
    /// Arguments that arrive as a JSON-encoded string (some model services
    /// double-encode them) are decoded first.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> Result<T, CalChatError> {
        let value = match &self.value {
            serde_json::Value::String(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    serde_json::json!({})
                } else {
                    serde_json::from_str::<serde_json::Value>(trimmed).map_err(|e| {
                        CalChatError::InvalidArgument(format!("arguments are not valid JSON: {e}"))
                    })?
                }
            }
            other => other.clone(),
        };
        serde_json::from_value(value)
            .map_err(|e| CalChatError::InvalidArgument(format!("arguments do not match: {e}")))
    }
}
