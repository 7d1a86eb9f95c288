//! Native/Desktop WebSocket implementation using tokio-tungstenite.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures_util::{SinkExt, StreamExt};
use learnhub_shared::{ClientCommand, ServerEvent, WsEnvelope};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::{ChatHandle, ConnectionState, ReconnectConfig};

/// A managed chat WebSocket connection (native implementation)
pub struct ChatConnection {
    /// Channel for sending commands
    sender: UnboundedSender<WsEnvelope<ClientCommand>>,
    /// Set by `close`; the connection loop exits when it observes it
    closed: Arc<AtomicBool>,
    /// Wakes the loop when `close` is called mid-wait
    close_notify: Arc<tokio::sync::Notify>,
}

impl ChatConnection {
    /// Open a connection. The loop runs until `close` is called or the
    /// reconnect budget is exhausted.
    pub fn open(
        url_builder: impl Fn() -> Option<String> + Send + Sync + 'static,
        on_event: impl Fn(WsEnvelope<ServerEvent>) + Send + Sync + 'static,
        on_state: impl Fn(ConnectionState) + Send + Sync + 'static,
    ) -> Self {
        let (sender, receiver) = unbounded();
        let closed = Arc::new(AtomicBool::new(false));
        let close_notify = Arc::new(tokio::sync::Notify::new());

        let connection = Self {
            sender,
            closed: closed.clone(),
            close_notify: close_notify.clone(),
        };

        start_connection_loop(
            receiver,
            Arc::new(url_builder),
            Arc::new(on_event),
            Arc::new(on_state),
            ReconnectConfig::default(),
            closed,
            close_notify,
        );

        connection
    }

    /// Get a handle for sending commands
    pub fn handle(&self) -> ChatHandle {
        ChatHandle::new(self.sender.clone())
    }

    /// Tear the connection down. Idempotent.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.close_notify.notify_waiters();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Shared view of the closed flag, for observing teardown after
    /// ownership moves elsewhere.
    #[cfg(test)]
    pub(crate) fn closed_flag(&self) -> Arc<AtomicBool> {
        self.closed.clone()
    }
}

/// Start the connection management loop in a background tokio task
#[allow(clippy::too_many_arguments)]
fn start_connection_loop(
    receiver: UnboundedReceiver<WsEnvelope<ClientCommand>>,
    url_builder: Arc<dyn Fn() -> Option<String> + Send + Sync>,
    on_event: Arc<dyn Fn(WsEnvelope<ServerEvent>) + Send + Sync>,
    on_state: Arc<dyn Fn(ConnectionState) + Send + Sync>,
    reconnect_config: ReconnectConfig,
    closed: Arc<AtomicBool>,
    close_notify: Arc<tokio::sync::Notify>,
) {
    tokio::spawn(async move {
        let receiver = Arc::new(tokio::sync::Mutex::new(receiver));
        let mut attempt = 0u32;

        loop {
            if closed.load(Ordering::SeqCst) {
                on_state(ConnectionState::Disconnected);
                break;
            }

            // Build URL
            let Some(url) = url_builder() else {
                // No URL available (probably not authenticated)
                on_state(ConnectionState::Disconnected);
                tokio::select! {
                    _ = tokio::time::sleep(tokio::time::Duration::from_millis(1000)) => {}
                    _ = close_notify.notified() => {}
                }
                continue;
            };

            if attempt == 0 {
                on_state(ConnectionState::Connecting);
            } else {
                on_state(ConnectionState::Reconnecting { attempt });
            }

            // Attempt connection
            match connect_async(&url).await {
                Ok((ws_stream, _response)) => {
                    on_state(ConnectionState::Connected);
                    attempt = 0;
                    crate::log_info!("chat socket connected");

                    let (mut write, mut read) = ws_stream.split();

                    // Channel to signal when connection closes
                    let (close_tx, mut close_rx) = tokio::sync::mpsc::unbounded_channel::<()>();

                    // Spawn read task
                    let on_event_clone = on_event.clone();
                    let close_tx_for_read = close_tx.clone();
                    tokio::spawn(async move {
                        while let Some(msg_result) = read.next().await {
                            match msg_result {
                                Ok(Message::Text(text)) => {
                                    match serde_json::from_str::<WsEnvelope<ServerEvent>>(&text) {
                                        Ok(event) => on_event_clone(event),
                                        Err(e) => {
                                            crate::log_error!("failed to parse chat frame: {}", e)
                                        }
                                    }
                                }
                                Ok(Message::Close(_)) => {
                                    crate::log_info!("chat socket received close frame");
                                    break;
                                }
                                Ok(Message::Ping(_)) => {
                                    // Pong is handled automatically by tungstenite
                                }
                                Ok(_) => {
                                    // Ignore binary, pong, etc.
                                }
                                Err(e) => {
                                    crate::log_error!("chat socket read error: {}", e);
                                    break;
                                }
                            }
                        }
                        let _ = close_tx_for_read.send(());
                    });

                    // Spawn write task
                    let receiver_for_write = receiver.clone();
                    tokio::spawn(async move {
                        loop {
                            let msg = {
                                let mut rx = receiver_for_write.lock().await;
                                rx.next().await
                            };

                            match msg {
                                Some(cmd) => match serde_json::to_string(&cmd) {
                                    Ok(json) => {
                                        if let Err(e) = write.send(Message::Text(json.into())).await {
                                            crate::log_error!("chat send failed: {}", e);
                                            break;
                                        }
                                    }
                                    Err(e) => {
                                        crate::log_error!("chat serialize failed: {}", e);
                                    }
                                },
                                None => {
                                    // Sender dropped
                                    break;
                                }
                            }
                        }
                        let _ = close_tx.send(());
                    });

                    // Wait for connection to close, or for an explicit teardown
                    tokio::select! {
                        _ = close_rx.recv() => {}
                        _ = close_notify.notified() => {}
                    }
                    crate::log_info!("chat socket closed");
                    on_state(ConnectionState::Disconnected);
                }
                Err(e) => {
                    crate::log_error!("chat socket error: {}", e);

                    // Check if we should retry
                    if reconnect_config.max_attempts > 0 && attempt >= reconnect_config.max_attempts
                    {
                        on_state(ConnectionState::Failed {
                            reason: format!(
                                "Max reconnect attempts ({}) exceeded",
                                reconnect_config.max_attempts
                            ),
                        });
                        break;
                    }

                    // Wait before reconnecting
                    let delay = reconnect_config.delay_for_attempt(attempt);
                    crate::log_info!("reconnecting chat in {}ms (attempt {})", delay, attempt + 1);
                    tokio::select! {
                        _ = tokio::time::sleep(tokio::time::Duration::from_millis(delay as u64)) => {}
                        _ = close_notify.notified() => {}
                    }
                    attempt += 1;
                }
            }
        }
    });
}
