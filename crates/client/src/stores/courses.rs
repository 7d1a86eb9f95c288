//! Storefront course browsing slice, filtered by category.

use dioxus::prelude::*;
use learnhub_shared::CourseSummary;

use crate::auth_session::AuthContext;
use crate::stores::slice::Slice;
use crate::stores::toasts;

pub static COURSES: GlobalSignal<Slice<Vec<CourseSummary>>> = Signal::global(Slice::new);

fn courses_path(category_id: Option<&str>) -> String {
    match category_id {
        Some(id) => format!("/courses?categoryId={}", urlencoding::encode(id)),
        None => "/courses".to_string(),
    }
}

/// Fetch the browsable course list, optionally scoped to a category.
pub fn fetch_courses(auth: &AuthContext, category_id: Option<&str>) {
    let ticket = COURSES.write().begin();
    let client = auth.client();
    let path = courses_path(category_id);

    spawn(async move {
        match client.get_json::<Vec<CourseSummary>>(&path).await {
            Ok(courses) => {
                COURSES.write().fulfill(ticket, courses);
            }
            Err(err) => {
                let message = err.user_message();
                toasts::error(&message);
                COURSES.write().reject(ticket, message);
            }
        }
    });
}

/// Format a cent price for display.
pub fn format_price(cents: i64) -> String {
    if cents == 0 {
        "Free".to_string()
    } else {
        format!("${}.{:02}", cents / 100, (cents % 100).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_includes_category_filter() {
        assert_eq!(courses_path(None), "/courses");
        assert_eq!(courses_path(Some("cat 1")), "/courses?categoryId=cat%201");
    }

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(0), "Free");
        assert_eq!(format_price(1999), "$19.99");
        assert_eq!(format_price(500), "$5.00");
    }
}
