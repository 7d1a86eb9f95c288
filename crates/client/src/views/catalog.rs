//! Storefront catalog: category browsing/search and course cards.

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::stores::cart::add_to_cart;
use crate::stores::categories::{fetch_categories, CATEGORIES};
use crate::stores::courses::{fetch_courses, format_price, COURSES};
use crate::stores::SliceStatus;

#[component]
pub fn Catalog() -> Element {
    let auth = use_context::<AuthContext>();
    let mut search = use_signal(String::new);
    let mut selected_category = use_signal(|| None::<String>);

    // Initial load; re-runs when the session changes so authenticated
    // pricing/visibility is reflected.
    use_effect(move || {
        let _ = auth.session.read();
        fetch_categories(&auth, None);
        fetch_courses(&auth, None);
    });

    let on_search = move |e: FormEvent| {
        let query = e.value();
        search.set(query.clone());
        // Every keystroke issues a fresh request; the slice discards
        // whichever responses come back stale.
        let query = query.trim().to_string();
        fetch_categories(
            &auth,
            if query.is_empty() {
                None
            } else {
                Some(query.as_str())
            },
        );
    };

    rsx! {
        div { class: "max-w-5xl mx-auto px-4 py-8",
            div { class: "flex items-center justify-between mb-6",
                h1 { class: "text-2xl font-bold text-white", "Browse courses" }
                input {
                    class: "w-64 bg-[#1e1f22] border-none rounded p-2.5 text-white placeholder-[#949ba4] focus:ring-0",
                    placeholder: "Search categories...",
                    value: "{search}",
                    oninput: on_search,
                }
            }

            // Category rail
            div { class: "flex flex-wrap gap-2 mb-8",
                button {
                    class: format!(
                        "px-3 py-1.5 rounded-full text-sm transition-colors {}",
                        if selected_category.read().is_none() {
                            "bg-indigo-500 text-white"
                        } else {
                            "bg-[#2b2d31] text-[#b5bac1] hover:text-white"
                        },
                    ),
                    onclick: move |_| {
                        selected_category.set(None);
                        fetch_courses(&auth, None);
                    },
                    "All"
                }
                match CATEGORIES.read().status() {
                    SliceStatus::Idle | SliceStatus::Pending => rsx! {
                        span { class: "px-3 py-1.5 text-sm text-gray-500", "Loading categories..." }
                    },
                    SliceStatus::Rejected(message) => rsx! {
                        span { class: "px-3 py-1.5 text-sm text-red-400", "{message}" }
                    },
                    SliceStatus::Fulfilled => rsx! {
                        for category in CATEGORIES.read().data().cloned().unwrap_or_default() {
                            button {
                                key: "{category.id}",
                                class: format!(
                                    "px-3 py-1.5 rounded-full text-sm transition-colors {}",
                                    if selected_category.read().as_deref() == Some(category.id.as_str()) {
                                        "bg-indigo-500 text-white"
                                    } else {
                                        "bg-[#2b2d31] text-[#b5bac1] hover:text-white"
                                    },
                                ),
                                onclick: {
                                    let id = category.id.clone();
                                    move |_| {
                                        selected_category.set(Some(id.clone()));
                                        fetch_courses(&auth, Some(&id));
                                    }
                                },
                                "{category.name} ({category.course_count})"
                            }
                        }
                    },
                }
            }

            // Course grid
            match COURSES.read().status() {
                SliceStatus::Idle | SliceStatus::Pending => rsx! {
                    div { class: "text-gray-400 py-12 text-center", "Loading courses..." }
                },
                SliceStatus::Rejected(message) => rsx! {
                    div { class: "text-red-400 py-12 text-center", "{message}" }
                },
                SliceStatus::Fulfilled => rsx! {
                    div { class: "grid grid-cols-1 md:grid-cols-3 gap-4",
                        for course in COURSES.read().data().cloned().unwrap_or_default() {
                            div {
                                key: "{course.id}",
                                class: "bg-[#2b2d31] rounded-lg p-4 flex flex-col",
                                h3 { class: "text-white font-semibold mb-1", "{course.title}" }
                                if let Some(subtitle) = course.subtitle.as_ref() {
                                    p { class: "text-sm text-gray-400 mb-2", "{subtitle}" }
                                }
                                if let Some(instructor) = course.instructor_name.as_ref() {
                                    p { class: "text-xs text-gray-500", "by {instructor}" }
                                }
                                div { class: "flex-1" }
                                div { class: "flex items-center justify-between mt-3",
                                    span { class: "text-indigo-300 font-medium",
                                        {format_price(course.price_cents)}
                                    }
                                    if auth.is_authenticated() {
                                        button {
                                            class: "px-3 py-1.5 bg-indigo-500 hover:bg-indigo-600 text-white text-sm rounded transition-colors",
                                            onclick: {
                                                let course_id = course.id.clone();
                                                move |_| add_to_cart(&auth, course_id.clone())
                                            },
                                            "Add to cart"
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
