//! WASM/Web-specific WebSocket implementation using web_sys::WebSocket.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_channel::mpsc::{unbounded, UnboundedReceiver};
use futures_util::StreamExt;
use learnhub_shared::{ClientCommand, ServerEvent, WsEnvelope};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::js_sys;

use super::{ChatHandle, ConnectionState, ReconnectConfig};

/// A managed chat WebSocket connection (WASM implementation)
pub struct ChatConnection {
    /// Channel for sending commands
    sender: futures_channel::mpsc::UnboundedSender<WsEnvelope<ClientCommand>>,
    /// Set by `close`; the connection loop exits when it observes it
    closed: Arc<AtomicBool>,
    /// The live socket, so `close` can terminate it immediately
    active: Rc<RefCell<Option<web_sys::WebSocket>>>,
}

impl ChatConnection {
    /// Open a connection. The loop runs until `close` is called or the
    /// reconnect budget is exhausted.
    pub fn open(
        url_builder: impl Fn() -> Option<String> + 'static,
        on_event: impl Fn(WsEnvelope<ServerEvent>) + 'static,
        on_state: impl Fn(ConnectionState) + 'static,
    ) -> Self {
        let (sender, receiver) = unbounded();
        let closed = Arc::new(AtomicBool::new(false));
        let active = Rc::new(RefCell::new(None));

        let connection = Self {
            sender,
            closed: closed.clone(),
            active: active.clone(),
        };

        connection.start_connection_loop(
            receiver,
            Rc::new(url_builder),
            Rc::new(on_event),
            Rc::new(on_state),
            closed,
            active,
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
        if let Some(ws) = self.active.borrow().as_ref() {
            let _ = ws.close();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Start the connection management loop
    fn start_connection_loop(
        &self,
        receiver: UnboundedReceiver<WsEnvelope<ClientCommand>>,
        url_builder: Rc<dyn Fn() -> Option<String>>,
        on_event: Rc<dyn Fn(WsEnvelope<ServerEvent>)>,
        on_state: Rc<dyn Fn(ConnectionState)>,
        closed: Arc<AtomicBool>,
        active: Rc<RefCell<Option<web_sys::WebSocket>>>,
    ) {
        let reconnect_config = ReconnectConfig::default();

        // Wrap receiver in Rc<RefCell> so the send task can access it
        let receiver = Rc::new(RefCell::new(receiver));

        spawn_local(async move {
            let mut attempt = 0u32;

            loop {
                if closed.load(Ordering::SeqCst) {
                    on_state(ConnectionState::Disconnected);
                    break;
                }

                // Build URL
                let Some(url) = url_builder() else {
                    on_state(ConnectionState::Disconnected);
                    gloo_timers::future::TimeoutFuture::new(1000).await;
                    continue;
                };

                if attempt == 0 {
                    on_state(ConnectionState::Connecting);
                } else {
                    on_state(ConnectionState::Reconnecting { attempt });
                }

                // Attempt connection
                match connect_websocket(&url, on_event.clone()).await {
                    Ok(ws) => {
                        on_state(ConnectionState::Connected);
                        attempt = 0;
                        crate::log_info!("chat socket connected");
                        *active.borrow_mut() = Some(ws.clone());

                        // Channel to signal when connection closes
                        let (close_tx, mut close_rx) = futures_channel::mpsc::unbounded::<()>();

                        // Set up close handler
                        let onclose_callback =
                            Closure::wrap(Box::new(move |_: web_sys::CloseEvent| {
                                let _ = close_tx.unbounded_send(());
                            }) as Box<dyn FnMut(web_sys::CloseEvent)>);
                        ws.set_onclose(Some(onclose_callback.as_ref().unchecked_ref()));
                        onclose_callback.forget();

                        // Spawn send task that awaits on the receiver
                        let ws_for_send = ws.clone();
                        let receiver_for_send = receiver.clone();
                        spawn_local(async move {
                            loop {
                                // Take receiver, await next message, put it back
                                let msg = {
                                    let mut rx = receiver_for_send.borrow_mut();
                                    rx.next().await
                                };

                                match msg {
                                    Some(cmd) => {
                                        // readyState 1 = OPEN
                                        if ws_for_send.ready_state() != 1 {
                                            break;
                                        }
                                        match serde_json::to_string(&cmd) {
                                            Ok(json) => {
                                                if let Err(e) = ws_for_send.send_with_str(&json) {
                                                    crate::log_error!("chat send failed: {:?}", e);
                                                }
                                            }
                                            Err(e) => {
                                                crate::log_error!("chat serialize failed: {}", e);
                                            }
                                        }
                                    }
                                    None => {
                                        // Sender dropped
                                        break;
                                    }
                                }
                            }
                        });

                        // Wait for connection to close
                        close_rx.next().await;
                        crate::log_info!("chat socket closed");
                        *active.borrow_mut() = None;
                        on_state(ConnectionState::Disconnected);
                    }
                    Err(e) => {
                        crate::log_error!("chat socket error: {}", e);

                        // Check if we should retry
                        if reconnect_config.max_attempts > 0
                            && attempt >= reconnect_config.max_attempts
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
                        crate::log_info!(
                            "reconnecting chat in {}ms (attempt {})",
                            delay,
                            attempt + 1
                        );
                        gloo_timers::future::TimeoutFuture::new(delay).await;
                        attempt += 1;
                    }
                }
            }
        });
    }
}

/// Internal function to establish a WebSocket connection and return it.
/// The caller is responsible for handling the send/receive loop.
async fn connect_websocket(
    url: &str,
    on_event: Rc<dyn Fn(WsEnvelope<ServerEvent>)>,
) -> Result<web_sys::WebSocket, String> {
    use web_sys::{CloseEvent, MessageEvent, WebSocket};

    let ws = WebSocket::new(url).map_err(|e| format!("Failed to create WebSocket: {:?}", e))?;

    // Track connection state
    let is_open = Rc::new(RefCell::new(false));
    let error_reason = Rc::new(RefCell::new(None::<String>));

    // Set up open handler
    let is_open_clone = is_open.clone();
    let onopen_callback = Closure::wrap(Box::new(move |_: web_sys::Event| {
        *is_open_clone.borrow_mut() = true;
    }) as Box<dyn FnMut(web_sys::Event)>);
    ws.set_onopen(Some(onopen_callback.as_ref().unchecked_ref()));
    onopen_callback.forget();

    // Set up close handler
    let error_reason_close = error_reason.clone();
    let onclose_callback = Closure::wrap(Box::new(move |e: CloseEvent| {
        let reason = if e.reason().is_empty() {
            format!("Code {}", e.code())
        } else {
            e.reason()
        };
        *error_reason_close.borrow_mut() = Some(reason);
    }) as Box<dyn FnMut(CloseEvent)>);
    ws.set_onclose(Some(onclose_callback.as_ref().unchecked_ref()));
    onclose_callback.forget();

    // Set up error handler
    let error_reason_err = error_reason.clone();
    let onerror_callback = Closure::wrap(Box::new(move |_: web_sys::ErrorEvent| {
        *error_reason_err.borrow_mut() = Some("WebSocket error".to_string());
    }) as Box<dyn FnMut(web_sys::ErrorEvent)>);
    ws.set_onerror(Some(onerror_callback.as_ref().unchecked_ref()));
    onerror_callback.forget();

    // Set up message handler
    let onmessage_callback = Closure::wrap(Box::new(move |e: MessageEvent| {
        if let Ok(text) = e.data().dyn_into::<js_sys::JsString>() {
            let text: String = text.into();
            if let Ok(event) = serde_json::from_str::<WsEnvelope<ServerEvent>>(&text) {
                on_event(event);
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);
    ws.set_onmessage(Some(onmessage_callback.as_ref().unchecked_ref()));
    onmessage_callback.forget();

    // Wait for connection to open
    for _ in 0..500 {
        // 5 second timeout
        if *is_open.borrow() {
            return Ok(ws);
        }
        if let Some(reason) = error_reason.borrow().clone() {
            return Err(reason);
        }
        // Yield to allow callbacks to fire
        gloo_timers::future::TimeoutFuture::new(10).await;
    }

    Err("Connection timeout".to_string())
}
