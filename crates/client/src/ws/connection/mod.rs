//! WebSocket connection with state management and auto-reconnect.
//!
//! This module provides the shared types and conditionally includes
//! the platform-specific implementation.

use chrono::Utc;
use futures_channel::mpsc::UnboundedSender;
use learnhub_shared::{ClientCommand, WsEnvelope};

/// Connection state for the chat socket
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting { attempt: u32 },
    Failed { reason: String },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    pub fn is_connecting(&self) -> bool {
        matches!(
            self,
            ConnectionState::Connecting | ConnectionState::Reconnecting { .. }
        )
    }
}

/// Configuration for auto-reconnect behavior
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Maximum number of reconnect attempts (0 = infinite)
    pub max_attempts: u32,
    /// Initial delay in milliseconds
    pub initial_delay_ms: u32,
    /// Maximum delay in milliseconds
    pub max_delay_ms: u32,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f32,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay_ms: 1000,
            max_delay_ms: 30000,
            backoff_multiplier: 1.5,
        }
    }
}

impl ReconnectConfig {
    /// Calculate delay for a given attempt number
    pub fn delay_for_attempt(&self, attempt: u32) -> u32 {
        let delay = self.initial_delay_ms as f32 * self.backoff_multiplier.powi(attempt as i32);
        (delay as u32).min(self.max_delay_ms)
    }
}

/// Handle for sending commands through the chat connection
#[derive(Clone)]
pub struct ChatHandle {
    sender: UnboundedSender<WsEnvelope<ClientCommand>>,
}

impl ChatHandle {
    pub(crate) fn new(sender: UnboundedSender<WsEnvelope<ClientCommand>>) -> Self {
        Self { sender }
    }

    /// Send a command to the server
    pub fn send(&self, cmd: ClientCommand) -> Result<(), String> {
        let envelope = WsEnvelope {
            id: uuid::Uuid::new_v4().to_string(),
            payload: cmd,
            ts: Utc::now(),
            correlation_id: None,
        };
        self.sender
            .unbounded_send(envelope)
            .map_err(|e| format!("Failed to send: {}", e))
    }

    /// Join a conversation's event stream
    pub fn join_conversation(&self, conversation_id: &str) -> Result<(), String> {
        self.send(ClientCommand::ConversationJoin {
            conversation_id: conversation_id.to_string(),
        })
    }

    /// Send a chat message
    pub fn send_message(
        &self,
        conversation_id: &str,
        body: &str,
        nonce: &str,
    ) -> Result<(), String> {
        self.send(ClientCommand::MessageSend {
            conversation_id: conversation_id.to_string(),
            body: body.to_string(),
            nonce: nonce.to_string(),
        })
    }
}

// Include platform-specific implementation
#[cfg(target_arch = "wasm32")]
mod connection_wasm;
#[cfg(target_arch = "wasm32")]
pub use connection_wasm::ChatConnection;

#[cfg(not(target_arch = "wasm32"))]
mod connection_native;
#[cfg(not(target_arch = "wasm32"))]
pub use connection_native::ChatConnection;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_and_caps() {
        let config = ReconnectConfig::default();
        assert_eq!(config.delay_for_attempt(0), 1000);
        assert!(config.delay_for_attempt(1) > config.delay_for_attempt(0));
        assert_eq!(config.delay_for_attempt(30), config.max_delay_ms);
    }
}
