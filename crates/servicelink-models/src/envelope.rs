//! Typed view of the envelope most backend endpoints return.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `{ success, message, data }` wrapper returned by the backend.
///
/// Fields the backend adds next to the three standard ones (pagination
/// blocks, conversation status, ...) are kept in `extra` so nothing is lost
/// when a caller re-serializes the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T = Value> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human readable status or error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Operation payload; serialized as `null` when absent
    pub data: Option<T>,
    /// Any other top-level fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<T> ApiEnvelope<T> {
    /// Successful envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            extra: Map::new(),
        }
    }

    /// Normalized failure: `{ success: false, message, data: null }`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            extra: Map::new(),
        }
    }

    /// Failure that still carries a payload (e.g. an empty message list).
    pub fn failure_with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::failure(message)
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Message text, or `""` when the backend sent none.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    /// Convert the payload while keeping status, message and extra fields.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiEnvelope<U> {
        ApiEnvelope {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
            extra: self.extra,
        }
    }

    /// `Ok(data)` on success, `Err(message)` otherwise.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.message.unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_serializes_null_data() {
        let env: ApiEnvelope = ApiEnvelope::failure("boom");
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value, json!({ "success": false, "message": "boom", "data": null }));
    }

    #[test]
    fn test_missing_success_is_not_an_envelope() {
        let result = serde_json::from_value::<ApiEnvelope>(json!({ "data": [1, 2] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_fields_preserved() {
        let raw = json!({
            "success": true,
            "data": [],
            "pagination": { "page": 2, "total": 40 }
        });
        let env: ApiEnvelope = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(env.extra.get("pagination"), Some(&json!({ "page": 2, "total": 40 })));
        assert_eq!(serde_json::to_value(&env).unwrap(), raw);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ApiEnvelope::ok(3).into_result(), Ok(Some(3)));
        assert_eq!(
            ApiEnvelope::<u8>::failure("nope").into_result(),
            Err("nope".to_string())
        );
    }
}
