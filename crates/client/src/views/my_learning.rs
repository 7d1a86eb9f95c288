//! Enrolled courses with progress and resume links.

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::stores::my_learning::{fetch_my_learning, MY_LEARNING};
use crate::stores::SliceStatus;
use crate::Route;

#[component]
pub fn MyLearning() -> Element {
    let auth = use_context::<AuthContext>();

    use_effect(move || {
        if auth.session.read().is_some() {
            fetch_my_learning(&auth);
        }
    });

    if !auth.is_authenticated() {
        return rsx! {
            div { class: "max-w-3xl mx-auto px-4 py-16 text-center text-gray-400",
                "Sign in to see your courses. "
                Link { to: Route::Login {}, class: "text-indigo-400 hover:underline", "Sign in" }
            }
        };
    }

    rsx! {
        div { class: "max-w-4xl mx-auto px-4 py-8",
            h1 { class: "text-2xl font-bold text-white mb-6", "My Learning" }

            match MY_LEARNING.read().status() {
                SliceStatus::Idle | SliceStatus::Pending => rsx! {
                    div { class: "text-gray-400 py-12 text-center", "Loading your courses..." }
                },
                SliceStatus::Rejected(message) => rsx! {
                    div { class: "p-4 bg-red-500/10 border border-red-500/30 rounded-lg text-red-400",
                        "{message}"
                        button {
                            class: "ml-3 text-sm underline",
                            onclick: move |_| fetch_my_learning(&auth),
                            "Retry"
                        }
                    }
                },
                SliceStatus::Fulfilled => rsx! {
                    {
                        let enrollments = MY_LEARNING.read().data().cloned().unwrap_or_default();
                        rsx! {
                            if enrollments.is_empty() {
                                div { class: "text-gray-400 py-12 text-center",
                                    "You haven't enrolled in anything yet."
                                }
                            } else {
                                div { class: "space-y-3",
                                    for enrollment in enrollments.iter() {
                                        div {
                                            key: "{enrollment.course.id}",
                                            class: "bg-[#2b2d31] rounded-lg p-4",
                                            div { class: "flex items-center justify-between mb-2",
                                                h3 { class: "text-white font-semibold",
                                                    "{enrollment.course.title}"
                                                }
                                                if let (Some(module_id), Some(lesson_id)) = (
                                                    enrollment.current_module_id.clone(),
                                                    enrollment.current_lesson_id.clone(),
                                                ) {
                                                    Link {
                                                        to: Route::QuizView {
                                                            course_id: enrollment.course.id.clone(),
                                                            module_id,
                                                            lesson_id,
                                                        },
                                                        class: "text-sm text-indigo-400 hover:underline",
                                                        "Continue"
                                                    }
                                                }
                                            }
                                            div { class: "h-2 bg-[#1e1f22] rounded-full overflow-hidden",
                                                div {
                                                    class: "h-full bg-indigo-500",
                                                    style: "width: {enrollment.progress_percent}%",
                                                }
                                            }
                                            p { class: "text-xs text-gray-500 mt-1",
                                                "{enrollment.progress_percent:.0}% complete"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
