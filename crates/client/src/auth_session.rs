//! Authentication session management with persistent storage.
//!
//! The session is two stored values — the bearer access token and the
//! last-known numeric role id — owned by [`AuthContext`] and persisted
//! through [`crate::storage`]. Both keys are cleared together on
//! logout, whether the user asked for it or a 401 forced it.

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::api_client::ApiClient;
use crate::config;
use crate::storage;
use crate::stores;

/// Authentication context provided to the app
#[derive(Clone, Copy, Debug)]
pub struct AuthContext {
    pub session: Signal<Option<AuthSession>>,
    pub api_host: Signal<String>,
}

/// Stored session data
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub access_token: String,
    pub cached_role_id: Option<i64>,
}

/// Bumped once per session teardown. Components that must react to
/// logout — no matter which page or slice detected it — watch this
/// instead of coupling to the HTTP gateway.
pub static SESSION_EPOCH: GlobalSignal<u64> = Signal::global(|| 0);

/// Remove both persisted session keys. They live and die together.
fn clear_persisted_session() {
    storage::remove(config::TOKEN_STORAGE_KEY);
    storage::remove(config::ROLE_STORAGE_KEY);
}

/// Global session teardown: clear both persisted keys and broadcast.
///
/// Installed as the HTTP gateway's 401 handler, and also the tail of a
/// user-initiated logout. Safe to call with an already-empty session.
pub fn force_logout() {
    clear_persisted_session();
    *SESSION_EPOCH.write() += 1;
}

/// Provider component that sets up auth context
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let session = use_signal(|| {
        let access_token = storage::load::<String>(config::TOKEN_STORAGE_KEY)?;
        let cached_role_id = storage::load::<i64>(config::ROLE_STORAGE_KEY);
        Some(AuthSession {
            access_token,
            cached_role_id,
        })
    });

    let api_host = use_signal(|| {
        storage::load::<String>(config::HOST_STORAGE_KEY)
            .unwrap_or_else(|| config::DEFAULT_API_HOST.to_string())
    });

    // Sync session to storage
    use_effect(move || {
        let current = session.cloned();
        match current {
            Some(sess) => {
                storage::save(config::TOKEN_STORAGE_KEY, &sess.access_token);
                match sess.cached_role_id {
                    Some(role_id) => {
                        storage::save(config::ROLE_STORAGE_KEY, &role_id);
                    }
                    None => storage::remove(config::ROLE_STORAGE_KEY),
                }
            }
            None => {
                storage::remove(config::TOKEN_STORAGE_KEY);
                storage::remove(config::ROLE_STORAGE_KEY);
            }
        }
    });

    // Sync host override to storage
    use_effect(move || {
        let host = api_host.cloned();
        storage::save(config::HOST_STORAGE_KEY, &host);
    });

    // React to forced teardown (401 from any authenticated call)
    let mut last_epoch = use_signal(|| *SESSION_EPOCH.peek());
    let mut session_for_epoch = session;
    use_effect(move || {
        let epoch = *SESSION_EPOCH.read();
        if epoch != *last_epoch.peek() {
            last_epoch.set(epoch);
            crate::log_info!("session teardown broadcast (epoch {})", epoch);
            session_for_epoch.set(None);
            stores::reset_all();
        }
    });

    use_context_provider(|| AuthContext { session, api_host });

    children
}

impl AuthContext {
    /// Store a fresh session after login or OTP verification.
    pub fn login(&mut self, access_token: String, role_id: Option<i64>) {
        self.session.set(Some(AuthSession {
            access_token,
            cached_role_id: role_id,
        }));
    }

    /// Opportunistically cache the role id carried by fetched profile
    /// data, so guards keep working across reloads before the next
    /// profile fetch settles.
    pub fn update_cached_role(&mut self, role_id: i64) {
        // Peek first: an unchanged role must not dirty the signal.
        let current = self.session.peek().as_ref().map(|s| s.cached_role_id);
        if current == Some(Some(role_id)) || current.is_none() {
            return;
        }
        if let Some(sess) = self.session.write().as_mut() {
            sess.cached_role_id = Some(role_id);
        }
    }

    /// Logout and clear session
    pub fn logout(&mut self) {
        force_logout();
        self.session.set(None);
    }

    /// Create an API client configured for the current session
    pub fn client(&self) -> ApiClient {
        let token = self.access_token();
        ApiClient::new()
            .with_base_url(self.api_base_url())
            .with_bearer(token)
            .with_unauthorized_handler(force_logout)
    }

    /// Check if user is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    /// Get the current access token
    pub fn access_token(&self) -> Option<String> {
        self.session
            .read()
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// Last-known numeric role id, if any
    pub fn cached_role_id(&self) -> Option<i64> {
        self.session.read().as_ref().and_then(|s| s.cached_role_id)
    }

    /// Get the base URL for API calls
    fn api_base_url(&self) -> String {
        normalize_base_url(&self.api_host.read())
    }

    /// Construct API URL for a path
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.api_base_url();
        if base.is_empty() {
            if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{path}")
            }
        } else {
            let base = base.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{base}/{path}")
        }
    }

    /// Construct WebSocket URL for a path
    pub fn ws_url(&self, path: &str) -> String {
        http_to_ws(&self.api_url(path))
    }
}

/// Check if a host is a local/development address.
fn is_local_address(host: &str) -> bool {
    let host_part = host.split(':').next().unwrap_or(host);
    host_part == "localhost"
        || host_part == "127.0.0.1"
        || host_part == "0.0.0.0"
        || host_part.starts_with("192.168.")
        || host_part.starts_with("10.")
}

/// Turn a stored host into a full base URL: explicit schemes pass
/// through, local addresses get `http`, everything else `https`.
fn normalize_base_url(host: &str) -> String {
    let host = host.trim();
    if host.is_empty() {
        return String::new(); // Use relative paths
    }

    if host.contains("://") {
        host.trim_end_matches('/').to_string()
    } else if is_local_address(host) {
        format!("http://{}", host.trim_end_matches('/'))
    } else {
        format!("https://{}", host.trim_end_matches('/'))
    }
}

/// Convert HTTP/HTTPS URL to WS/WSS
fn http_to_ws(url: &str) -> String {
    if url.starts_with("https://") {
        url.replacen("https://", "wss://", 1)
    } else if url.starts_with("http://") {
        url.replacen("http://", "ws://", 1)
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_hosts_get_http_scheme() {
        assert_eq!(
            normalize_base_url("localhost:4000"),
            "http://localhost:4000"
        );
        assert_eq!(
            normalize_base_url("192.168.1.20:4000"),
            "http://192.168.1.20:4000"
        );
    }

    #[test]
    fn remote_hosts_get_https_scheme() {
        assert_eq!(
            normalize_base_url("api.learnhub.dev"),
            "https://api.learnhub.dev"
        );
    }

    #[test]
    fn explicit_schemes_pass_through() {
        assert_eq!(
            normalize_base_url("http://api.internal/"),
            "http://api.internal"
        );
        assert_eq!(normalize_base_url(""), "");
    }

    #[test]
    fn teardown_clears_both_session_keys() {
        storage::save(config::TOKEN_STORAGE_KEY, &"token-abc".to_string());
        storage::save(config::ROLE_STORAGE_KEY, &5i64);

        clear_persisted_session();

        assert_eq!(storage::load::<String>(config::TOKEN_STORAGE_KEY), None);
        assert_eq!(storage::load::<i64>(config::ROLE_STORAGE_KEY), None);
    }

    #[test]
    fn ws_conversion_preserves_security() {
        assert_eq!(
            http_to_ws("https://api.learnhub.dev/chat"),
            "wss://api.learnhub.dev/chat"
        );
        assert_eq!(
            http_to_ws("http://localhost:4000/chat"),
            "ws://localhost:4000/chat"
        );
    }
}
