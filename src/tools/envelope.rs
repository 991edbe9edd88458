//! The uniform reply shape of every tool.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::EditError;

pub const JSON_MIME_TYPE: &str = "application/json";

/// One JSON payload handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    /// The payload, serialized as a JSON string.
    pub content: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

impl Envelope {
    /// Parse the payload back into JSON.
    pub fn payload(&self) -> serde_json::Result<JsonValue> {
        serde_json::from_str(&self.content)
    }
}

/// What every tool returns: a single-element list of envelopes.
pub type ToolOutput = Vec<Envelope>;

/// Status and message pair reported by tools that act rather than query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub status_code: u16,
    pub message: String,
}

impl ToolResponse {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

impl From<&EditError> for ToolResponse {
    fn from(err: &EditError) -> Self {
        Self::new(err.status_code(), err.to_string())
    }
}

/// Wrap `data` as a JSON tool reply.
pub fn make_response<T: Serialize>(data: &T) -> ToolOutput {
    let payload = serde_json::to_value(data).unwrap_or_else(|e| {
        serde_json::json!({
            "status_code": 500,
            "message": format!("Failed to serialize tool response: {}", e),
        })
    });

    vec![Envelope {
        kind: "json".to_string(),
        content: payload.to_string(),
        mime_type: JSON_MIME_TYPE.to_string(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_wire_shape() {
        let output = make_response(&ToolResponse::new(200, "done"));
        assert_eq!(output.len(), 1);

        let wire = serde_json::to_value(&output).unwrap();
        assert_eq!(wire[0]["type"], "json");
        assert_eq!(wire[0]["mimeType"], "application/json");

        let content = wire[0]["content"].as_str().unwrap();
        let payload: serde_json::Value = serde_json::from_str(content).unwrap();
        assert_eq!(payload, json!({"status_code": 200, "message": "done"}));
    }

    #[test]
    fn test_payload_round_trips_through_content() {
        let output = make_response(&json!({"username": "alice", "owned": false}));
        let payload = output[0].payload().unwrap();
        assert_eq!(payload["username"], "alice");
        assert_eq!(payload["owned"], false);
    }

    #[test]
    fn test_edit_error_maps_to_status() {
        let response = ToolResponse::from(&EditError::NoChange);
        assert_eq!(response.status_code, 400);
        assert!(!response.is_success());
        assert!(response.message.contains("no change"));
    }
}
