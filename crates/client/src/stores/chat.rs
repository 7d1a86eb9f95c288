//! Chat stores: the conversation list slice and the per-conversation
//! message store.
//!
//! Components read from these stores, never from socket events
//! directly; the realtime gateway writes incoming events here and the
//! REST history fetch fills in the baseline.

use std::collections::HashMap;

use dioxus::prelude::*;
use learnhub_shared::{ChatMessageDto, ConversationDto, ServerEvent};

use crate::auth_session::AuthContext;
use crate::stores::slice::Slice;
use crate::stores::toasts;

/// UI-shaped conversation row.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSnapshot {
    pub id: String,
    pub title: String,
    pub member_ids: Vec<String>,
    pub last_message_preview: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A message stored in the chat message store. Unified format for both
/// REST history and live socket delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub body: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Messages for a single conversation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationMessages {
    /// All messages, sorted by created_at ascending.
    pub messages: Vec<ChatMessage>,
    /// Whether history has been fetched from the REST API.
    pub is_loaded: bool,
}

impl ConversationMessages {
    /// Add a message, maintaining sort order by created_at.
    /// Returns false if a message with the same ID already exists.
    pub fn add_message(&mut self, msg: ChatMessage) -> bool {
        if self.messages.iter().any(|m| m.id == msg.id) {
            return false;
        }

        let pos = self
            .messages
            .binary_search_by(|m| m.created_at.cmp(&msg.created_at))
            .unwrap_or_else(|pos| pos);

        self.messages.insert(pos, msg);
        true
    }

    /// Set the full message history (from the REST fetch).
    pub fn set_history(&mut self, mut messages: Vec<ChatMessage>) {
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        self.messages = messages;
        self.is_loaded = true;
    }
}

pub static CONVERSATIONS: GlobalSignal<Slice<Vec<ConversationSnapshot>>> =
    Signal::global(Slice::new);

/// Message store keyed by conversation id.
pub static MESSAGES: GlobalSignal<HashMap<String, ConversationMessages>> =
    Signal::global(HashMap::new);

fn normalize_message(raw: ChatMessageDto) -> ChatMessage {
    ChatMessage {
        id: raw.id,
        sender_name: raw
            .sender_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| raw.sender_id.clone()),
        sender_id: raw.sender_id,
        body: raw.body,
        created_at: raw.created_at,
    }
}

fn normalize_conversation(raw: ConversationDto) -> ConversationSnapshot {
    ConversationSnapshot {
        id: raw.id,
        title: raw.title,
        member_ids: raw.members.into_iter().map(|m| m.user_id).collect(),
        last_message_preview: raw.last_message.map(|m| m.body),
        created_at: raw.created_at,
    }
}

/// Newest conversation first.
pub fn normalize_conversations(raw: Vec<ConversationDto>) -> Vec<ConversationSnapshot> {
    let mut conversations: Vec<ConversationSnapshot> =
        raw.into_iter().map(normalize_conversation).collect();
    conversations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    conversations
}

pub fn fetch_conversations(auth: &AuthContext) {
    let ticket = CONVERSATIONS.write().begin();
    let client = auth.client();

    spawn(async move {
        match client
            .get_json::<Vec<ConversationDto>>("/chat/conversations")
            .await
        {
            Ok(raw) => {
                CONVERSATIONS
                    .write()
                    .fulfill(ticket, normalize_conversations(raw));
            }
            Err(err) => {
                let message = err.user_message();
                toasts::error(&message);
                CONVERSATIONS.write().reject(ticket, message);
            }
        }
    });
}

/// Fetch message history for one conversation into the message store.
pub fn fetch_messages(auth: &AuthContext, conversation_id: String) {
    let client = auth.client();

    spawn(async move {
        let path = format!("/chat/conversations/{conversation_id}/messages");
        match client.get_json::<Vec<ChatMessageDto>>(&path).await {
            Ok(raw) => {
                let history = raw.into_iter().map(normalize_message).collect();
                MESSAGES
                    .write()
                    .entry(conversation_id)
                    .or_default()
                    .set_history(history);
            }
            Err(err) => {
                toasts::error(err.user_message());
            }
        }
    });
}

/// Apply one server event to the chat stores. Returns the warning to
/// surface, if the event warrants one.
fn apply_event(
    conversations: &mut Slice<Vec<ConversationSnapshot>>,
    messages: &mut HashMap<String, ConversationMessages>,
    event: ServerEvent,
) -> Option<String> {
    match event {
        ServerEvent::MessageNew {
            conversation_id,
            message,
        } => {
            let normalized = normalize_message(message);
            if let Some(list) = conversations.data_mut() {
                if let Some(conv) = list.iter_mut().find(|c| c.id == conversation_id) {
                    conv.last_message_preview = Some(normalized.body.clone());
                }
            }
            messages
                .entry(conversation_id)
                .or_default()
                .add_message(normalized);
            None
        }
        ServerEvent::MemberKicked {
            conversation_id,
            user_id,
        } => {
            if let Some(list) = conversations.data_mut() {
                if let Some(conv) = list.iter_mut().find(|c| c.id == conversation_id) {
                    conv.member_ids.retain(|id| id != &user_id);
                }
            }
            None
        }
        ServerEvent::UserKicked { conversation_id } => {
            if let Some(list) = conversations.data_mut() {
                list.retain(|c| c.id != conversation_id);
            }
            messages.remove(&conversation_id);
            Some("You were removed from a conversation".to_string())
        }
        ServerEvent::ConversationAdded { conversation } => {
            let snapshot = normalize_conversation(conversation);
            if let Some(list) = conversations.data_mut() {
                if !list.iter().any(|c| c.id == snapshot.id) {
                    list.insert(0, snapshot);
                }
            }
            None
        }
        ServerEvent::Error { code, message, .. } => {
            crate::log_warn!("chat error {}: {}", code, message);
            Some(message)
        }
    }
}

/// Entry point for the realtime gateway's event dispatch.
pub fn apply_server_event(event: ServerEvent) {
    let warning = apply_event(&mut CONVERSATIONS.write(), &mut MESSAGES.write(), event);
    if let Some(warning) = warning {
        toasts::warning(warning);
    }
}

/// Clear everything (logout / reconnect as a different user).
pub fn reset() {
    CONVERSATIONS.write().reset();
    MESSAGES.write().clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn msg(id: &str, minutes_ago: i64) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            sender_id: "u1".to_string(),
            sender_name: "Ada".to_string(),
            body: format!("message {id}"),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    fn snapshot(id: &str) -> ConversationSnapshot {
        ConversationSnapshot {
            id: id.to_string(),
            title: format!("conv {id}"),
            member_ids: vec!["u1".to_string(), "u2".to_string()],
            last_message_preview: None,
            created_at: Utc::now(),
        }
    }

    fn fulfilled_conversations(ids: &[&str]) -> Slice<Vec<ConversationSnapshot>> {
        let mut slice = Slice::new();
        let ticket = slice.begin();
        slice.fulfill(ticket, ids.iter().map(|id| snapshot(id)).collect());
        slice
    }

    #[test]
    fn add_message_dedupes_and_keeps_order() {
        let mut conv = ConversationMessages::default();
        assert!(conv.add_message(msg("b", 5)));
        assert!(conv.add_message(msg("a", 10)));
        assert!(!conv.add_message(msg("a", 10)), "duplicate id rejected");

        let ids: Vec<&str> = conv.messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn user_kicked_removes_conversation_and_messages() {
        let mut conversations = fulfilled_conversations(&["c1", "c2"]);
        let mut messages = HashMap::new();
        messages.insert("c1".to_string(), ConversationMessages::default());

        let warning = apply_event(
            &mut conversations,
            &mut messages,
            ServerEvent::UserKicked {
                conversation_id: "c1".to_string(),
            },
        );

        assert!(warning.is_some());
        assert!(!messages.contains_key("c1"));
        let ids: Vec<&str> = conversations
            .data()
            .unwrap()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c2"]);
    }

    #[test]
    fn member_kicked_only_trims_the_member_list() {
        let mut conversations = fulfilled_conversations(&["c1"]);
        let mut messages = HashMap::new();

        apply_event(
            &mut conversations,
            &mut messages,
            ServerEvent::MemberKicked {
                conversation_id: "c1".to_string(),
                user_id: "u2".to_string(),
            },
        );

        let conv = &conversations.data().unwrap()[0];
        assert_eq!(conv.member_ids, vec!["u1".to_string()]);
    }

    #[test]
    fn conversation_added_inserts_once() {
        let mut conversations = fulfilled_conversations(&["c1"]);
        let mut messages = HashMap::new();

        let incoming = ConversationDto {
            id: "c2".to_string(),
            title: "New course Q&A".to_string(),
            members: vec![],
            last_message: None,
            created_at: Utc::now(),
        };

        apply_event(
            &mut conversations,
            &mut messages,
            ServerEvent::ConversationAdded {
                conversation: incoming.clone(),
            },
        );
        apply_event(
            &mut conversations,
            &mut messages,
            ServerEvent::ConversationAdded {
                conversation: incoming,
            },
        );

        assert_eq!(conversations.data().unwrap().len(), 2);
        assert_eq!(conversations.data().unwrap()[0].id, "c2");
    }

    #[test]
    fn message_new_updates_preview_and_store() {
        let mut conversations = fulfilled_conversations(&["c1"]);
        let mut messages = HashMap::new();

        apply_event(
            &mut conversations,
            &mut messages,
            ServerEvent::MessageNew {
                conversation_id: "c1".to_string(),
                message: ChatMessageDto {
                    id: "m1".to_string(),
                    conversation_id: "c1".to_string(),
                    sender_id: "u2".to_string(),
                    sender_name: None,
                    body: "hello".to_string(),
                    created_at: Utc::now(),
                },
            },
        );

        assert_eq!(messages["c1"].messages.len(), 1);
        assert_eq!(
            messages["c1"].messages[0].sender_name, "u2",
            "sender id backfills a missing name"
        );
        assert_eq!(
            conversations.data().unwrap()[0].last_message_preview.as_deref(),
            Some("hello")
        );
    }
}
