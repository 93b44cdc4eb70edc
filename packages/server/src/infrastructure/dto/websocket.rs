//! WebSocket message DTOs sent by clients.
//!
//! Outbound messages are [`ServerMessage`](crate::domain::ServerMessage).

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Message types a client may send
const KNOWN_TYPES: [&str; 4] = ["chat", "ping", "get_stats", "broadcast"];

/// Message received from a client, tagged by `type` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Chat {
        #[serde(default)]
        message: String,
        #[serde(default)]
        timestamp: Option<String>,
    },
    Ping {
        #[serde(default)]
        timestamp: Option<String>,
    },
    GetStats {},
    Broadcast {
        #[serde(default)]
        message: String,
        #[serde(default)]
        admin_key: Option<String>,
    },
}

/// Why an incoming text frame could not be turned into a [`ClientMessage`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientMessageError {
    #[error("Invalid JSON message")]
    InvalidJson,

    /// `type` missing (reported as `unknown`) or not one of the known types
    #[error("Unknown message type: {0}")]
    UnknownType(String),

    #[error("Invalid {kind} message: {reason}")]
    InvalidPayload { kind: String, reason: String },
}

impl ClientMessage {
    /// Parse a text frame.
    pub fn parse(text: &str) -> Result<Self, ClientMessageError> {
        let value: Value =
            serde_json::from_str(text).map_err(|_| ClientMessageError::InvalidJson)?;

        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        if !KNOWN_TYPES.contains(&kind.as_str()) {
            return Err(ClientMessageError::UnknownType(kind));
        }

        serde_json::from_value(value).map_err(|e| ClientMessageError::InvalidPayload {
            kind,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat() {
        // テスト項目: chat メッセージをパースできる
        // when (操作):
        let result = ClientMessage::parse(
            r#"{"type":"chat","message":"hello","timestamp":"2025-01-01T00:00:00Z"}"#,
        );

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(ClientMessage::Chat {
                message: "hello".to_string(),
                timestamp: Some("2025-01-01T00:00:00Z".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_defaults_missing_fields() {
        // テスト項目: 省略されたフィールドはデフォルト値になる
        // when (操作):
        let chat = ClientMessage::parse(r#"{"type":"chat"}"#);
        let ping = ClientMessage::parse(r#"{"type":"ping"}"#);
        let stats = ClientMessage::parse(r#"{"type":"get_stats","extra":1}"#);

        // then (期待する結果):
        assert_eq!(
            chat,
            Ok(ClientMessage::Chat {
                message: String::new(),
                timestamp: None,
            })
        );
        assert_eq!(ping, Ok(ClientMessage::Ping { timestamp: None }));
        assert_eq!(stats, Ok(ClientMessage::GetStats {}));
    }

    #[test]
    fn test_parse_broadcast_with_admin_key() {
        // テスト項目: broadcast メッセージの admin_key を取り出せる
        // when (操作):
        let result =
            ClientMessage::parse(r#"{"type":"broadcast","message":"hi","admin_key":"secret"}"#);

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(ClientMessage::Broadcast {
                message: "hi".to_string(),
                admin_key: Some("secret".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_unknown_type() {
        // テスト項目: 未知の type と type の欠落は UnknownType になる
        // when (操作):
        let unknown = ClientMessage::parse(r#"{"type":"dance"}"#);
        let missing = ClientMessage::parse(r#"{"message":"hi"}"#);

        // then (期待する結果):
        assert_eq!(
            unknown,
            Err(ClientMessageError::UnknownType("dance".to_string()))
        );
        assert_eq!(
            missing,
            Err(ClientMessageError::UnknownType("unknown".to_string()))
        );
        assert_eq!(
            unknown.unwrap_err().to_string(),
            "Unknown message type: dance"
        );
    }

    #[test]
    fn test_parse_invalid_json() {
        // テスト項目: JSON でないテキストは InvalidJson になる
        // when (操作):
        let result = ClientMessage::parse("hello there");

        // then (期待する結果):
        assert_eq!(result, Err(ClientMessageError::InvalidJson));
    }

    #[test]
    fn test_parse_invalid_payload() {
        // テスト項目: 型が合わないフィールドは InvalidPayload になる
        // when (操作):
        let result = ClientMessage::parse(r#"{"type":"ping","timestamp":42}"#);

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ClientMessageError::InvalidPayload { ref kind, .. }) if kind == "ping"
        ));
    }
}
