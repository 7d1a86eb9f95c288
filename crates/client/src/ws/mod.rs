//! Realtime chat gateway.
//!
//! One WebSocket to the `/chat` namespace, owned by [`ChatContext`]
//! with explicit `open`/`close` lifecycle. Incoming events are written
//! directly to the chat stores; components read from the stores, never
//! from the socket.
//!
//! Invariant: at most one live connection per tab — `open` always
//! tears down the previous socket before creating the next one.

mod connection;
mod gateway;

pub use connection::{ChatConnection, ChatHandle, ConnectionState, ReconnectConfig};
pub use gateway::{ChatContext, ChatProvider, ConnectionSlot, CHAT_STATE};
