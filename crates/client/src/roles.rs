//! Role resolution from profile data and the cached role id.
//!
//! Guards must never mistake "profile fetch not settled yet" for "no
//! role": [`resolve`] reports `loading` until the profile slice
//! settles, and only then walks the fallback chain.

use learnhub_shared::UserProfile;

use crate::stores::slice::Slice;

pub const ADMIN_ROLE_ID: i64 = 5;
pub const INSTRUCTOR_ROLE_ID: i64 = 2;

/// Coarse application role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Instructor,
    Student,
}

impl Role {
    /// Map a recognized role id; unknown ids map to nothing so the
    /// fallback chain can keep looking.
    fn from_recognized_id(id: i64) -> Option<Role> {
        match id {
            ADMIN_ROLE_ID => Some(Role::Admin),
            INSTRUCTOR_ROLE_ID => Some(Role::Instructor),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Instructor => "instructor",
            Role::Student => "student",
        }
    }
}

/// Result of a role resolution.
///
/// `loading == true` means the answer is not known yet; `role` is
/// `None` in that case and callers must not treat it as unauthorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleResolution {
    pub role: Option<Role>,
    pub loading: bool,
}

impl RoleResolution {
    pub const LOADING: RoleResolution = RoleResolution {
        role: None,
        loading: true,
    };
}

/// Derive the current role from the profile slice and the cached id.
///
/// Sources, in priority order: the role id embedded in the fetched
/// profile, the first element of its roles array, then the cached id.
/// If no source yields a recognized id the role defaults to student —
/// including when the profile fetch failed outright.
pub fn resolve(profile: &Slice<UserProfile>, cached_role_id: Option<i64>) -> RoleResolution {
    if !profile.is_settled() {
        return RoleResolution::LOADING;
    }

    let fetched = profile.data();
    let candidates = [
        fetched.and_then(|p| p.role_id),
        fetched.and_then(|p| p.roles.first().map(|r| r.id)),
        cached_role_id,
    ];

    let role = candidates
        .into_iter()
        .flatten()
        .find_map(Role::from_recognized_id)
        .unwrap_or(Role::Student);

    RoleResolution {
        role: Some(role),
        loading: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use learnhub_shared::RoleEntry;

    fn profile_with(role_id: Option<i64>, roles: Vec<RoleEntry>) -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            email: "user@learnhub.dev".to_string(),
            full_name: None,
            avatar: None,
            role_id,
            roles,
            email_verified: true,
            created_at: Utc::now(),
        }
    }

    fn fulfilled(profile: UserProfile) -> Slice<UserProfile> {
        let mut slice = Slice::new();
        let ticket = slice.begin();
        slice.fulfill(ticket, profile);
        slice
    }

    fn rejected() -> Slice<UserProfile> {
        let mut slice = Slice::new();
        let ticket = slice.begin();
        slice.reject(ticket, "profile fetch failed");
        slice
    }

    #[test]
    fn unsettled_profile_yields_loading_not_a_role() {
        let idle = Slice::new();
        assert_eq!(resolve(&idle, Some(ADMIN_ROLE_ID)), RoleResolution::LOADING);

        let mut pending = Slice::<UserProfile>::new();
        pending.begin();
        let res = resolve(&pending, Some(ADMIN_ROLE_ID));
        assert!(res.loading);
        assert_eq!(res.role, None);
    }

    #[test]
    fn profile_role_id_wins() {
        let slice = fulfilled(profile_with(Some(INSTRUCTOR_ROLE_ID), vec![]));
        assert_eq!(resolve(&slice, Some(ADMIN_ROLE_ID)).role, Some(Role::Instructor));
    }

    #[test]
    fn roles_array_first_element_is_second_choice() {
        let slice = fulfilled(profile_with(
            None,
            vec![
                RoleEntry { id: ADMIN_ROLE_ID, name: Some("admin".into()) },
                RoleEntry { id: INSTRUCTOR_ROLE_ID, name: None },
            ],
        ));
        assert_eq!(resolve(&slice, None).role, Some(Role::Admin));
    }

    #[test]
    fn cached_role_id_backs_a_missing_profile() {
        assert_eq!(resolve(&rejected(), Some(5)).role, Some(Role::Admin));
        assert_eq!(resolve(&rejected(), Some(2)).role, Some(Role::Instructor));
    }

    #[test]
    fn unrecognized_or_absent_ids_default_to_student() {
        assert_eq!(resolve(&rejected(), Some(42)).role, Some(Role::Student));
        assert_eq!(resolve(&rejected(), None).role, Some(Role::Student));

        let slice = fulfilled(profile_with(Some(99), vec![]));
        assert_eq!(resolve(&slice, None).role, Some(Role::Student));
    }

    #[test]
    fn unrecognized_profile_id_falls_through_to_cached() {
        let slice = fulfilled(profile_with(Some(99), vec![]));
        assert_eq!(resolve(&slice, Some(ADMIN_ROLE_ID)).role, Some(Role::Admin));
    }
}
