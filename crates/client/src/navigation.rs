//! Browser navigation helpers for effects the router can't express.

/// Navigate the whole tab to an external URL (payment provider, OAuth
/// authorize page). Terminal: nothing after this runs on success.
#[cfg(target_arch = "wasm32")]
pub fn redirect_external(url: &str) {
    if let Some(window) = web_sys::window() {
        if window.location().set_href(url).is_err() {
            crate::log_error!("failed to redirect to {}", url);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn redirect_external(url: &str) {
    // Desktop builds have no external browser hand-off; surface the
    // URL so the user can follow it manually.
    crate::log_warn!("open externally: {}", url);
}
