//! Toast overlay: renders the global toast queue and expires it.

use chrono::Utc;
use dioxus::prelude::*;

use crate::stores::toasts::{self, ToastLevel, TOASTS};

const TOAST_MAX_AGE_SECS: i64 = 4;

#[cfg(target_arch = "wasm32")]
async fn sleep_ms(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep_ms(ms: u32) {
    tokio::time::sleep(std::time::Duration::from_millis(ms as u64)).await;
}

fn level_classes(level: ToastLevel) -> &'static str {
    match level {
        ToastLevel::Info => "bg-[#2b2d31] border-indigo-500/40 text-gray-200",
        ToastLevel::Success => "bg-[#2b2d31] border-green-500/40 text-green-300",
        ToastLevel::Warning => "bg-[#2b2d31] border-yellow-500/40 text-yellow-300",
        ToastLevel::Error => "bg-[#2b2d31] border-red-500/40 text-red-300",
    }
}

#[component]
pub fn Toaster() -> Element {
    // Sweep expired toasts once a second while any are visible.
    use_future(move || async move {
        loop {
            sleep_ms(1000).await;
            let mut queue = TOASTS.write();
            if !queue.toasts.is_empty() {
                queue.expire(Utc::now(), TOAST_MAX_AGE_SECS);
            }
        }
    });

    rsx! {
        div { class: "fixed bottom-4 right-4 z-50 flex flex-col gap-2 max-w-sm",
            for toast in TOASTS.read().toasts.iter() {
                div {
                    key: "{toast.id}",
                    class: format!(
                        "px-4 py-3 rounded-lg border shadow-lg text-sm cursor-pointer {}",
                        level_classes(toast.level),
                    ),
                    onclick: {
                        let id = toast.id;
                        move |_| toasts::dismiss(id)
                    },
                    "{toast.message}"
                }
            }
        }
    }
}
