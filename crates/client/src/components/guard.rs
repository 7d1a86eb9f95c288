//! Role-based access guards for protected routes.
//!
//! The rule that matters: while role resolution is still loading, the
//! guard waits — a momentarily-absent role must never bounce the user
//! to the unauthorized page.

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::roles::{self, Role, RoleResolution};
use crate::stores::profile::{fetch_profile, PROFILE};
use crate::Route;

/// What a protected route requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    AdminOnly,
    InstructorOrAdmin,
}

impl Capability {
    pub fn permits(&self, role: Role) -> bool {
        match self {
            Capability::AdminOnly => matches!(role, Role::Admin),
            Capability::InstructorOrAdmin => matches!(role, Role::Admin | Role::Instructor),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Role not resolved yet; render a placeholder, never a redirect.
    Wait,
    Allow,
    Deny,
}

/// Pure gating rule, separated from rendering so it can be tested.
pub fn decide(resolution: &RoleResolution, capability: Capability) -> GuardDecision {
    if resolution.loading {
        return GuardDecision::Wait;
    }
    match resolution.role {
        Some(role) if capability.permits(role) => GuardDecision::Allow,
        _ => GuardDecision::Deny,
    }
}

/// Render `children` only when the resolved role carries `capability`.
/// Unauthenticated users go to login; unauthorized ones to the fixed
/// unauthorized route.
#[component]
pub fn RequireRole(capability: Capability, children: Element) -> Element {
    let auth = use_context::<AuthContext>();
    let nav = use_navigator();

    use_effect(move || {
        if auth.session.read().is_none() {
            nav.push(Route::Login {});
            return;
        }
        if PROFILE.read().is_idle() {
            fetch_profile(&auth);
            return;
        }
        let resolution = roles::resolve(&PROFILE.read(), auth.cached_role_id());
        if decide(&resolution, capability) == GuardDecision::Deny {
            nav.push(Route::Unauthorized {});
        }
    });

    if !auth.is_authenticated() {
        return rsx! {
            GuardPlaceholder {}
        };
    }

    let resolution = roles::resolve(&PROFILE.read(), auth.cached_role_id());
    match decide(&resolution, capability) {
        GuardDecision::Allow => children,
        // Deny renders the placeholder for the frame the redirect takes.
        GuardDecision::Wait | GuardDecision::Deny => rsx! {
            GuardPlaceholder {}
        },
    }
}

#[component]
fn GuardPlaceholder() -> Element {
    rsx! {
        div { class: "flex items-center justify-center py-24 text-gray-400",
            "Checking access..."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled(role: Role) -> RoleResolution {
        RoleResolution {
            role: Some(role),
            loading: false,
        }
    }

    #[test]
    fn loading_resolution_waits_and_never_denies() {
        let decision = decide(&RoleResolution::LOADING, Capability::AdminOnly);
        assert_eq!(decision, GuardDecision::Wait);
    }

    #[test]
    fn admin_only_admits_only_admins() {
        assert_eq!(
            decide(&settled(Role::Admin), Capability::AdminOnly),
            GuardDecision::Allow
        );
        assert_eq!(
            decide(&settled(Role::Instructor), Capability::AdminOnly),
            GuardDecision::Deny
        );
        assert_eq!(
            decide(&settled(Role::Student), Capability::AdminOnly),
            GuardDecision::Deny
        );
    }

    #[test]
    fn instructor_or_admin_is_set_membership() {
        assert_eq!(
            decide(&settled(Role::Admin), Capability::InstructorOrAdmin),
            GuardDecision::Allow
        );
        assert_eq!(
            decide(&settled(Role::Instructor), Capability::InstructorOrAdmin),
            GuardDecision::Allow
        );
        assert_eq!(
            decide(&settled(Role::Student), Capability::InstructorOrAdmin),
            GuardDecision::Deny
        );
    }
}
