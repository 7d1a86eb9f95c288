//! Chat page: conversation list plus live message pane.
//!
//! Everything rendered here comes from the chat stores; the socket
//! writes into them behind the scenes.

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::stores::chat::{fetch_conversations, fetch_messages, CONVERSATIONS, MESSAGES};
use crate::stores::toasts;
use crate::stores::SliceStatus;
use crate::ws::{ChatContext, CHAT_STATE};
use crate::Route;

#[component]
pub fn ChatView() -> Element {
    let auth = use_context::<AuthContext>();
    let chat = use_context::<ChatContext>();
    let mut selected = use_signal(|| None::<String>);
    let mut draft = use_signal(String::new);

    use_effect(move || {
        if auth.session.read().is_some() {
            fetch_conversations(&auth);
        }
    });

    // Load history and join the room whenever the selection changes.
    use_effect(move || {
        if let Some(conversation_id) = selected.read().clone() {
            fetch_messages(&auth, conversation_id.clone());
            if let Some(handle) = chat.handle() {
                if let Err(e) = handle.join_conversation(&conversation_id) {
                    crate::log_warn!("join failed: {}", e);
                }
            }
        }
    });

    if !auth.is_authenticated() {
        return rsx! {
            div { class: "max-w-3xl mx-auto px-4 py-16 text-center text-gray-400",
                "Sign in to chat. "
                Link { to: Route::Login {}, class: "text-indigo-400 hover:underline", "Sign in" }
            }
        };
    }

    let connected = CHAT_STATE.read().is_connected();

    let handle_send = move |e: FormEvent| {
        e.prevent_default();
        let Some(conversation_id) = selected.read().clone() else {
            return;
        };
        let body = draft.read().trim().to_string();
        if body.is_empty() {
            return;
        }

        match chat.handle() {
            Some(handle) => {
                let nonce = uuid::Uuid::new_v4().to_string();
                if let Err(e) = handle.send_message(&conversation_id, &body, &nonce) {
                    toasts::error(format!("Message not sent: {e}"));
                } else {
                    draft.set(String::new());
                }
            }
            None => toasts::warning("Chat is not connected yet"),
        }
    };

    rsx! {
        div { class: "max-w-5xl mx-auto px-4 py-8",
            div { class: "flex items-center gap-2 mb-4",
                h1 { class: "text-2xl font-bold text-white", "Chat" }
                span {
                    class: format!(
                        "w-2.5 h-2.5 rounded-full {}",
                        if connected { "bg-green-500" } else { "bg-gray-500" },
                    ),
                }
                span { class: "text-xs text-gray-500",
                    if connected { "connected" } else { "offline" }
                }
            }

            div { class: "flex gap-4 h-[560px]",
                // Conversation list
                div { class: "w-64 bg-[#2b2d31] rounded-lg overflow-y-auto",
                    match CONVERSATIONS.read().status() {
                        SliceStatus::Idle | SliceStatus::Pending => rsx! {
                            div { class: "p-4 text-sm text-gray-500", "Loading..." }
                        },
                        SliceStatus::Rejected(message) => rsx! {
                            div { class: "p-4 text-sm text-red-400", "{message}" }
                        },
                        SliceStatus::Fulfilled => rsx! {
                            for conversation in CONVERSATIONS.read().data().cloned().unwrap_or_default() {
                                div {
                                    key: "{conversation.id}",
                                    class: format!(
                                        "px-4 py-3 cursor-pointer transition-colors {}",
                                        if selected.read().as_deref() == Some(conversation.id.as_str()) {
                                            "bg-[#404249] text-white"
                                        } else {
                                            "text-[#b5bac1] hover:bg-[#35373c]"
                                        },
                                    ),
                                    onclick: {
                                        let id = conversation.id.clone();
                                        move |_| selected.set(Some(id.clone()))
                                    },
                                    div { class: "text-sm font-medium truncate", "{conversation.title}" }
                                    if let Some(preview) = conversation.last_message_preview.as_ref() {
                                        div { class: "text-xs text-gray-500 truncate", "{preview}" }
                                    }
                                }
                            }
                        },
                    }
                }

                // Message pane
                div { class: "flex-1 bg-[#2b2d31] rounded-lg flex flex-col",
                    match selected.read().clone() {
                        None => rsx! {
                            div { class: "flex-1 flex items-center justify-center text-gray-500",
                                "Pick a conversation"
                            }
                        },
                        Some(conversation_id) => rsx! {
                            div { class: "flex-1 overflow-y-auto p-4 space-y-3",
                                {
                                    let store = MESSAGES.read();
                                    match store.get(&conversation_id) {
                                        Some(conv) if conv.is_loaded => rsx! {
                                            for message in conv.messages.iter() {
                                                div { key: "{message.id}",
                                                    div { class: "text-xs text-gray-500",
                                                        "{message.sender_name}"
                                                    }
                                                    div { class: "text-sm text-gray-200", "{message.body}" }
                                                }
                                            }
                                        },
                                        _ => rsx! {
                                            div { class: "text-sm text-gray-500", "Loading messages..." }
                                        },
                                    }
                                }
                            }
                            form {
                                class: "p-3 border-t border-[#1e1f22] flex gap-2",
                                onsubmit: handle_send,
                                input {
                                    class: "flex-1 bg-[#1e1f22] border-none rounded p-2.5 text-white placeholder-[#949ba4] focus:ring-0",
                                    placeholder: "Write a message...",
                                    value: "{draft}",
                                    oninput: move |e: FormEvent| draft.set(e.value()),
                                }
                                button {
                                    r#type: "submit",
                                    class: "px-4 py-2 bg-indigo-500 hover:bg-indigo-600 text-white rounded transition-colors",
                                    "Send"
                                }
                            }
                        },
                    }
                }
            }
        }
    }
}
