//! JSON bodies exchanged over `/chat`.
//!
//! Shared by the axum handlers and the terminal client so both ends agree
//! on field names (`sessionId`, `createdAt`).

use serde::{Deserialize, Serialize};

use noah_types::chat::StoredTurn;

/// `POST /chat/message` request as sent by the terminal client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// `POST /chat/message` request as accepted by the server.
///
/// Both fields are loosely typed so a non-string `message` is reported as
/// "Please enter a message." rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingMessage {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
    #[serde(default)]
    pub session_id: Option<serde_json::Value>,
}

impl IncomingMessage {
    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().and_then(serde_json::Value::as_str)
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_ref().and_then(serde_json::Value::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub reply: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub messages: Vec<StoredTurn>,
    pub session_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incoming_message_ignores_non_string_fields() {
        let body: IncomingMessage =
            serde_json::from_str(r#"{"message": 42, "sessionId": "s-1"}"#).unwrap();
        assert_eq!(body.message(), None);
        assert_eq!(body.session_id(), Some("s-1"));
    }

    #[test]
    fn test_send_request_omits_missing_session() {
        let json = serde_json::to_value(SendMessageRequest {
            message: "hi".to_string(),
            session_id: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"message": "hi"}));
    }
}
