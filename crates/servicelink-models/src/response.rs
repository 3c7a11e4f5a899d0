//! Result of a normalized endpoint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::envelope::ApiEnvelope;

/// What a normalized endpoint hands back.
///
/// A response the backend produced is kept exactly as sent, whatever its
/// shape: an envelope, a bare object or an array. Only failures that never
/// yielded a usable body are synthesized, as `{ success: false, message,
/// data }`. Serializing yields the same JSON a caller of the REST API sees.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Parsed body and HTTP status
    Body { status: u16, body: Value },
    /// Locally produced failure
    Failure(ApiEnvelope),
}

impl ApiResponse {
    pub fn from_body(status: u16, body: Value) -> Self {
        Self::Body { status, body }
    }

    /// `{ success: false, message, data: null }`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(ApiEnvelope::failure(message))
    }

    /// Failure carrying fallback data.
    pub fn failure_with_data(message: impl Into<String>, data: Value) -> Self {
        Self::Failure(ApiEnvelope::failure_with_data(message, data))
    }

    /// A 2xx body that does not report `success: false`.
    pub fn is_success(&self) -> bool {
        match self {
            Self::Body { status, body } => {
                (200..300).contains(status)
                    && body.get("success").and_then(Value::as_bool) != Some(false)
            }
            Self::Failure(_) => false,
        }
    }

    /// HTTP status, when a response arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Body { status, .. } => Some(*status),
            Self::Failure(_) => None,
        }
    }

    /// Top-level `message`, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Body { body, .. } => body.get("message").and_then(Value::as_str),
            Self::Failure(envelope) => envelope.message.as_deref(),
        }
    }

    /// Top-level `data`, if present and not null.
    pub fn data(&self) -> Option<&Value> {
        let data = match self {
            Self::Body { body, .. } => body.get("data"),
            Self::Failure(envelope) => envelope.data.as_ref(),
        };
        data.filter(|d| !d.is_null())
    }

    /// The backend body, untouched. `None` for synthesized failures.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Body { body, .. } => Some(body),
            Self::Failure(_) => None,
        }
    }

    pub fn body_mut(&mut self) -> Option<&mut Value> {
        match self {
            Self::Body { body, .. } => Some(body),
            Self::Failure(_) => None,
        }
    }

    /// The JSON a caller of the REST API would see.
    pub fn into_value(self) -> Value {
        match self {
            Self::Body { body, .. } => body,
            Self::Failure(envelope) => serde_json::to_value(envelope).unwrap_or_default(),
        }
    }

    /// Deserialize the JSON into a typed view, e.g. `ApiEnvelope<T>`.
    pub fn parse<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        match self {
            Self::Body { body, .. } => T::deserialize(body),
            Self::Failure(envelope) => serde_json::from_value(serde_json::to_value(envelope)?),
        }
    }
}

impl Serialize for ApiResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Body { body, .. } => body.serialize(serializer),
            Self::Failure(envelope) => envelope.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_without_envelope_is_untouched() {
        let body = json!({ "id": "s1", "title": "Plumbing" });
        let response = ApiResponse::from_body(200, body.clone());
        assert!(response.is_success());
        assert_eq!(response.message(), None);
        assert_eq!(response.data(), None);
        assert_eq!(serde_json::to_value(&response).unwrap(), body);
        assert_eq!(response.into_value(), body);
    }

    #[test]
    fn test_array_body() {
        let response = ApiResponse::from_body(200, json!([{ "id": 1 }]));
        assert!(response.is_success());
        assert_eq!(response.body().unwrap()[0]["id"], 1);
    }

    #[test]
    fn test_success_flag_respected() {
        let response = ApiResponse::from_body(200, json!({ "success": false, "message": "Closed" }));
        assert!(!response.is_success());
        assert_eq!(response.message(), Some("Closed"));

        let response = ApiResponse::from_body(403, json!({ "success": true }));
        assert!(!response.is_success());
    }

    #[test]
    fn test_failure_shape() {
        let response = ApiResponse::failure("boom");
        assert!(!response.is_success());
        assert_eq!(response.status(), None);
        assert_eq!(
            response.into_value(),
            json!({ "success": false, "message": "boom", "data": null })
        );

        let response = ApiResponse::failure_with_data("Failed to load messages", json!([]));
        assert_eq!(response.data(), Some(&json!([])));
    }

    #[test]
    fn test_parse_envelope_view() {
        let response = ApiResponse::from_body(
            200,
            json!({ "success": true, "data": { "count": 3 }, "page": 1 }),
        );
        let envelope: ApiEnvelope = response.parse().unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data, Some(json!({ "count": 3 })));
        assert_eq!(envelope.extra.get("page"), Some(&json!(1)));

        let bare = ApiResponse::from_body(200, json!({ "id": 1 }));
        assert!(bare.parse::<ApiEnvelope>().is_err());
    }
}
