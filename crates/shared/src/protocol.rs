//! Chat WebSocket protocol: envelope, commands, events, and the
//! connection auth parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ChatMessageDto, ConversationDto};

/// Envelope wrapping every frame on the chat socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsEnvelope<T> {
    pub id: String,
    #[serde(flatten)]
    pub payload: T,
    pub ts: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ClientCommand {
    #[serde(rename = "conversation.join")]
    ConversationJoin { conversation_id: String },
    #[serde(rename = "message.send")]
    MessageSend {
        conversation_id: String,
        body: String,
        nonce: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    #[serde(rename = "message.new")]
    MessageNew {
        conversation_id: String,
        message: ChatMessageDto,
    },
    /// Another member was removed from a conversation.
    #[serde(rename = "member.kicked")]
    MemberKicked {
        conversation_id: String,
        user_id: String,
    },
    /// The current user was removed from a conversation.
    #[serde(rename = "user.kicked")]
    UserKicked { conversation_id: String },
    #[serde(rename = "conversation.added")]
    ConversationAdded { conversation: ConversationDto },
    Error {
        code: String,
        message: String,
        correlation_id: Option<String>,
    },
}

/// Authentication parameters for the `/chat` namespace.
///
/// The token is carried under two field names because deployed servers
/// disagree on which one they read: a bare `token` and a bearer-style
/// `authorization`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAuthParams {
    pub token: String,
    pub authorization: String,
}

impl ChatAuthParams {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let authorization = format!("Bearer {token}");
        Self {
            token,
            authorization,
        }
    }

    /// Serialize into a URL query string.
    pub fn to_query_string(&self) -> String {
        format!(
            "token={}&authorization={}",
            urlencoding::encode(&self.token),
            urlencoding::encode(&self.authorization)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_params_carry_token_under_both_fields() {
        let params = ChatAuthParams::new("abc123");
        assert_eq!(params.token, "abc123");
        assert_eq!(params.authorization, "Bearer abc123");

        let query = params.to_query_string();
        assert!(query.contains("token=abc123"));
        assert!(query.contains("authorization=Bearer%20abc123"));
    }

    #[test]
    fn server_event_tags_decode() {
        let json = r#"{
            "id": "f1",
            "type": "user.kicked",
            "data": { "conversationId": "c9" },
            "ts": "2025-06-01T10:00:00Z"
        }"#;
        let envelope: WsEnvelope<ServerEvent> = serde_json::from_str(json).unwrap();
        match envelope.payload {
            ServerEvent::UserKicked { conversation_id } => assert_eq!(conversation_id, "c9"),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
