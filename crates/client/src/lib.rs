//! learnhub client - Dioxus web application
//!
//! This crate contains the web/desktop client for learnhub, an
//! e-learning storefront: catalog, cart/checkout, authentication,
//! instructor tools, chat, and quizzes over the remote REST/WebSocket
//! API.

pub mod api_client;
pub mod auth_session;
pub mod config;
pub mod logging;
pub mod navigation;
pub mod roles;
pub mod storage;
pub mod stores;
pub mod ws;

pub mod components;
pub mod routes;
pub mod views;

pub use api_client::ApiClient;
pub use auth_session::{AuthContext, AuthProvider, AuthSession};
pub use routes::Route;
pub use ws::{ChatContext, ChatProvider};
