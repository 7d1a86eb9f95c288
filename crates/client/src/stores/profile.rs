//! Current user's profile slice.

use dioxus::prelude::*;
use learnhub_shared::UserProfile;

use crate::auth_session::AuthContext;
use crate::stores::slice::Slice;
use crate::stores::toasts;

pub static PROFILE: GlobalSignal<Slice<UserProfile>> = Signal::global(Slice::new);

/// Fetch `GET /users/me`. On success the carried role id is cached
/// into the persisted session so guards survive a reload.
pub fn fetch_profile(auth: &AuthContext) {
    let ticket = PROFILE.write().begin();
    let client = auth.client();
    let mut auth = *auth;

    spawn(async move {
        match client.get_json::<UserProfile>("/users/me").await {
            Ok(profile) => {
                let role_id = profile
                    .role_id
                    .or_else(|| profile.roles.first().map(|r| r.id));
                if let Some(role_id) = role_id {
                    auth.update_cached_role(role_id);
                }
                PROFILE.write().fulfill(ticket, profile);
            }
            Err(err) => {
                let message = err.user_message();
                crate::log_warn!("profile fetch failed: {}", message);
                toasts::error(&message);
                PROFILE.write().reject(ticket, message);
            }
        }
    });
}
