//! Chat gateway context: explicit ownership and lifecycle of the one
//! chat connection.

use dioxus::prelude::*;
use learnhub_shared::ChatAuthParams;

use super::connection::{ChatConnection, ChatHandle, ConnectionState};
use crate::auth_session::AuthContext;
use crate::config;
use crate::stores;

/// Connection state, readable from any component (e.g. the chat view's
/// presence dot).
pub static CHAT_STATE: GlobalSignal<ConnectionState> =
    Signal::global(|| ConnectionState::Disconnected);

/// Owner of the single chat connection. Replacing the occupant always
/// closes the previous one first — last writer wins, no queueing.
#[derive(Default)]
pub struct ConnectionSlot {
    current: Option<ChatConnection>,
}

impl ConnectionSlot {
    pub fn replace(&mut self, connection: ChatConnection) {
        if let Some(previous) = self.current.take() {
            previous.close();
        }
        self.current = Some(connection);
    }

    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.close();
        }
    }

    pub fn handle(&self) -> Option<ChatHandle> {
        self.current.as_ref().map(|c| c.handle())
    }

    pub fn is_occupied(&self) -> bool {
        self.current.is_some()
    }
}

/// Chat gateway handed to components through context.
#[derive(Clone, Copy)]
pub struct ChatContext {
    slot: Signal<ConnectionSlot>,
}

impl ChatContext {
    /// Open a connection authenticated as the current session, tearing
    /// down any prior connection first.
    pub fn open(&mut self, auth: &AuthContext) {
        let Some(token) = auth.access_token() else {
            return;
        };

        let base = auth.ws_url(config::CHAT_NAMESPACE);
        let url = format!("{}?{}", base, ChatAuthParams::new(token).to_query_string());
        let url_builder = move || Some(url.clone());

        let connection = ChatConnection::open(
            url_builder,
            |envelope| stores::chat::apply_server_event(envelope.payload),
            |state| *CHAT_STATE.write() = state,
        );
        self.slot.write().replace(connection);
    }

    /// Tear down and clear the connection.
    pub fn close(&mut self) {
        self.slot.write().clear();
        *CHAT_STATE.write() = ConnectionState::Disconnected;
    }

    /// The live handle, or `None` when no connection exists.
    pub fn handle(&self) -> Option<ChatHandle> {
        self.slot.read().handle()
    }
}

/// Provider component owning the chat connection lifecycle:
/// init-on-login, teardown-on-logout-or-reconnect.
#[component]
pub fn ChatProvider(children: Element) -> Element {
    let auth = use_context::<AuthContext>();
    let slot = use_signal(ConnectionSlot::default);
    let mut chat = use_context_provider(|| ChatContext { slot });

    // Track the current token to detect session changes
    let mut last_token = use_signal(|| None::<String>);

    use_effect(move || {
        let token = auth.session.read().as_ref().map(|s| s.access_token.clone());
        if *last_token.peek() == token {
            return;
        }
        last_token.set(token.clone());

        match token {
            Some(_) => {
                crate::log_info!("session available, (re)opening chat connection");
                chat.open(&auth);
            }
            None => {
                crate::log_info!("session gone, closing chat connection");
                chat.close();
                stores::chat::reset();
            }
        }
    });

    children
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    fn idle_connection() -> ChatConnection {
        // A url_builder returning None keeps the loop parked without
        // touching the network.
        ChatConnection::open(|| None, |_| {}, |_| {})
    }

    #[tokio::test]
    async fn connecting_twice_leaves_exactly_one_open_connection() {
        let mut slot = ConnectionSlot::default();

        let first = idle_connection();
        let first_closed = first.closed_flag();
        slot.replace(first);
        assert!(!first_closed.load(Ordering::SeqCst), "fresh connection starts open");

        let second = idle_connection();
        let second_closed = second.closed_flag();
        slot.replace(second);

        assert!(
            first_closed.load(Ordering::SeqCst),
            "first connection closed before the second took over"
        );
        assert!(!second_closed.load(Ordering::SeqCst));
        assert!(slot.is_occupied());
        assert!(slot.handle().is_some());
    }

    #[tokio::test]
    async fn clear_closes_and_empties_the_slot() {
        let mut slot = ConnectionSlot::default();
        let connection = idle_connection();
        let closed = connection.closed_flag();
        slot.replace(connection);

        slot.clear();
        assert!(closed.load(Ordering::SeqCst));
        assert!(!slot.is_occupied());
        assert!(slot.handle().is_none());
    }
}
