//! Enrolled-course slice backing the "My Learning" page.

use dioxus::prelude::*;
use learnhub_shared::EnrolledCourse;

use crate::auth_session::AuthContext;
use crate::stores::slice::Slice;
use crate::stores::toasts;

pub static MY_LEARNING: GlobalSignal<Slice<Vec<EnrolledCourse>>> = Signal::global(Slice::new);

/// Most recent enrollment first.
pub fn normalize_enrollments(mut raw: Vec<EnrolledCourse>) -> Vec<EnrolledCourse> {
    raw.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));
    raw
}

pub fn fetch_my_learning(auth: &AuthContext) {
    let ticket = MY_LEARNING.write().begin();
    let client = auth.client();

    spawn(async move {
        match client.get_json::<Vec<EnrolledCourse>>("/users/me/courses").await {
            Ok(raw) => {
                MY_LEARNING
                    .write()
                    .fulfill(ticket, normalize_enrollments(raw));
            }
            Err(err) => {
                let message = err.user_message();
                toasts::error(&message);
                MY_LEARNING.write().reject(ticket, message);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use learnhub_shared::CourseSummary;

    fn enrollment(title: &str, days_ago: i64) -> EnrolledCourse {
        EnrolledCourse {
            course: CourseSummary {
                id: title.to_lowercase(),
                title: title.to_string(),
                subtitle: None,
                thumbnail: None,
                instructor_name: None,
                price_cents: 0,
                rating: None,
                category_id: None,
            },
            progress_percent: 0.0,
            current_module_id: None,
            current_lesson_id: None,
            enrolled_at: Utc::now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn newest_enrollment_sorts_first() {
        let normalized = normalize_enrollments(vec![
            enrollment("Old", 30),
            enrollment("New", 1),
            enrollment("Middle", 10),
        ]);
        let titles: Vec<&str> = normalized.iter().map(|e| e.course.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Middle", "Old"]);
    }
}
