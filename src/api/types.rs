use serde::Deserialize;
use thiserror::Error;

use crate::models::{Message, UserRecord};

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a well-formed envelope and `success: false`.
    /// The payload is the user-facing text.
    #[error("{0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Transport-level failures are collapsed into one generic user-facing
    /// message; application-level rejections carry their own text.
    pub fn is_transport(&self) -> bool {
        !matches!(self, ApiError::Rejected(_))
    }
}

/// Envelope for `POST /register` and `POST /check-emails`.
#[derive(Debug, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub success: bool,
    #[serde(default)]
    pub user: Option<UserRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /` on the server root; not wrapped in the success envelope.
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_register_rejection() {
        let ack: AckResponse =
            serde_json::from_str(r#"{"success": false, "error": "Email already registered"}"#)
                .unwrap();
        assert!(!ack.success);
        assert_eq!(ack.error.as_deref(), Some("Email already registered"));
        assert!(ack.message.is_none());
    }

    #[test]
    fn decodes_user_payload_and_ignores_extras() {
        let response: UserResponse = serde_json::from_str(
            r#"{"success": true, "user": {"email": "a@b.c", "name": "Ada",
                "context": {"occupation": "engineer"}, "timestamp": "2026-08-06T10:00:00"}}"#,
        )
        .unwrap();
        assert!(response.success);
        assert_eq!(response.user.unwrap().name, "Ada");
    }

    #[test]
    fn decodes_bare_failure() {
        let response: UserResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!response.success);
        assert!(response.user.is_none());
    }

    #[test]
    fn decodes_history_messages() {
        let response: HistoryResponse = serde_json::from_str(
            r#"{"success": true, "messages": [
                {"role": "user", "content": "hello", "timestamp": "2026-08-06T10:00:00"},
                {"role": "assistant", "content": "hi there", "timestamp": "2026-08-06T10:05:00"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(response.messages.len(), 2);
        assert_eq!(response.messages[0].content, "hello");
    }
}
