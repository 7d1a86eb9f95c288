//! Shared types and utilities for the learnhub client.
//!
//! This crate is the wire contract with the remote learnhub API:
//! REST payload shapes, the chat WebSocket protocol, and the error
//! envelope clients decode failures into.

pub mod error;
pub mod models;
pub mod protocol;

pub use error::*;
pub use models::*;
pub use protocol::*;
