//! Global toast store for transient user-facing notices.
//!
//! Slice failures land here so every page surfaces errors the same
//! way; the `Toaster` component renders and expires the queue.

use chrono::{DateTime, Utc};
use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct ToastQueue {
    next_id: u64,
    pub toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            level,
            message: message.into(),
            created_at: Utc::now(),
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Drop everything older than `max_age_secs`.
    pub fn expire(&mut self, now: DateTime<Utc>, max_age_secs: i64) {
        self.toasts
            .retain(|t| (now - t.created_at).num_seconds() < max_age_secs);
    }
}

pub static TOASTS: GlobalSignal<ToastQueue> = Signal::global(ToastQueue::default);

pub fn info(message: impl Into<String>) {
    TOASTS.write().push(ToastLevel::Info, message);
}

pub fn success(message: impl Into<String>) {
    TOASTS.write().push(ToastLevel::Success, message);
}

pub fn warning(message: impl Into<String>) {
    TOASTS.write().push(ToastLevel::Warning, message);
}

pub fn error(message: impl Into<String>) {
    TOASTS.write().push(ToastLevel::Error, message);
}

pub fn dismiss(id: u64) {
    TOASTS.write().dismiss(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn push_assigns_increasing_ids_and_dismiss_removes() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastLevel::Info, "one");
        let second = queue.push(ToastLevel::Error, "two");
        assert!(second > first);
        assert_eq!(queue.toasts.len(), 2);

        queue.dismiss(first);
        assert_eq!(queue.toasts.len(), 1);
        assert_eq!(queue.toasts[0].message, "two");
    }

    #[test]
    fn expire_drops_only_old_toasts() {
        let mut queue = ToastQueue::default();
        queue.push(ToastLevel::Info, "old");
        queue.toasts[0].created_at = Utc::now() - Duration::seconds(10);
        queue.push(ToastLevel::Info, "fresh");

        queue.expire(Utc::now(), 5);
        assert_eq!(queue.toasts.len(), 1);
        assert_eq!(queue.toasts[0].message, "fresh");
    }
}
