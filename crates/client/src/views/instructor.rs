//! Instructor dashboard: category management and a quiz builder.
//! Gated to instructors and admins.

use dioxus::prelude::*;
use learnhub_shared::{
    CreateCategoryRequest, CreateQuizQuestion, CreateQuizRequest, UpdateCategoryRequest,
};

use crate::auth_session::AuthContext;
use crate::components::{Capability, RequireRole};
use crate::stores::categories::{
    create_category, delete_category, fetch_categories, update_category, CATEGORIES,
};
use crate::stores::quizzes::{create_quiz, LessonPath};
use crate::stores::SliceStatus;

#[component]
pub fn InstructorDashboard() -> Element {
    rsx! {
        RequireRole { capability: Capability::InstructorOrAdmin,
            DashboardContent {}
        }
    }
}

#[component]
fn DashboardContent() -> Element {
    let auth = use_context::<AuthContext>();

    use_effect(move || {
        if auth.session.read().is_some() {
            fetch_categories(&auth, None);
        }
    });

    rsx! {
        div { class: "max-w-4xl mx-auto px-4 py-8",
            h1 { class: "text-2xl font-bold text-white mb-6", "Instructor dashboard" }
            div { class: "grid grid-cols-1 md:grid-cols-2 gap-6",
                CategoryManager {}
                QuizBuilder {}
            }
        }
    }
}

#[component]
fn CategoryManager() -> Element {
    let auth = use_context::<AuthContext>();
    let mut new_name = use_signal(String::new);
    // id of the category being renamed, plus the draft name
    let mut editing = use_signal(|| None::<(String, String)>);

    let handle_create = move |e: FormEvent| {
        e.prevent_default();
        let name = new_name.read().trim().to_string();
        if name.is_empty() {
            return;
        }
        create_category(
            &auth,
            CreateCategoryRequest {
                name,
                localized_name: None,
                description: None,
            },
        );
        new_name.set(String::new());
    };

    rsx! {
        div { class: "bg-[#2b2d31] rounded-lg p-5",
            h2 { class: "text-lg font-semibold text-white mb-4", "Categories" }

            form { class: "flex gap-2 mb-4", onsubmit: handle_create,
                input {
                    class: "flex-1 bg-[#1e1f22] border-none rounded p-2 text-white placeholder-[#949ba4] focus:ring-0",
                    placeholder: "New category name",
                    value: "{new_name}",
                    oninput: move |e: FormEvent| new_name.set(e.value()),
                }
                button {
                    r#type: "submit",
                    class: "px-4 py-2 bg-indigo-500 hover:bg-indigo-600 text-white rounded text-sm transition-colors",
                    "Add"
                }
            }

            match CATEGORIES.read().status() {
                SliceStatus::Idle | SliceStatus::Pending => rsx! {
                    div { class: "text-sm text-gray-500", "Loading..." }
                },
                SliceStatus::Rejected(message) => rsx! {
                    div { class: "text-sm text-red-400", "{message}" }
                },
                SliceStatus::Fulfilled => rsx! {
                    div { class: "space-y-2",
                        for category in CATEGORIES.read().data().cloned().unwrap_or_default() {
                            {
                                let edit_draft = editing
                                    .read()
                                    .as_ref()
                                    .filter(|(id, _)| id == &category.id)
                                    .map(|(_, name)| name.clone());
                                rsx! {
                                    div {
                                        key: "{category.id}",
                                        class: "flex items-center gap-2 bg-[#1e1f22] rounded p-2",
                                        if let Some(draft) = edit_draft {
                                            input {
                                                class: "flex-1 bg-[#313338] border-none rounded p-1.5 text-white text-sm focus:ring-0",
                                                value: "{draft}",
                                                oninput: {
                                                    let id = category.id.clone();
                                                    move |e: FormEvent| editing.set(Some((id.clone(), e.value())))
                                                },
                                            }
                                            button {
                                                class: "text-sm text-green-400 hover:text-green-300",
                                                onclick: {
                                                    let id = category.id.clone();
                                                    move |_| {
                                                        if let Some((_, name)) = editing.read().clone() {
                                                            let name = name.trim().to_string();
                                                            if !name.is_empty() {
                                                                update_category(
                                                                    &auth,
                                                                    id.clone(),
                                                                    UpdateCategoryRequest {
                                                                        name: Some(name),
                                                                        localized_name: None,
                                                                        description: None,
                                                                    },
                                                                );
                                                            }
                                                        }
                                                        editing.set(None);
                                                    }
                                                },
                                                "Save"
                                            }
                                        } else {
                                            span { class: "flex-1 text-sm text-gray-200", "{category.name}" }
                                            span { class: "text-xs text-gray-500", "{category.course_count} courses" }
                                            button {
                                                class: "text-sm text-gray-400 hover:text-white",
                                                onclick: {
                                                    let id = category.id.clone();
                                                    let name = category.name.clone();
                                                    move |_| editing.set(Some((id.clone(), name.clone())))
                                                },
                                                "Rename"
                                            }
                                            button {
                                                class: "text-sm text-gray-400 hover:text-red-400",
                                                onclick: {
                                                    let id = category.id.clone();
                                                    move |_| delete_category(&auth, id.clone())
                                                },
                                                "Delete"
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

#[component]
fn QuizBuilder() -> Element {
    let auth = use_context::<AuthContext>();
    let mut course_id = use_signal(String::new);
    let mut module_id = use_signal(String::new);
    let mut lesson_id = use_signal(String::new);
    let mut title = use_signal(String::new);
    let mut prompt = use_signal(String::new);
    let mut options = use_signal(String::new);
    let mut correct_index = use_signal(|| 0u32);

    let handle_create = move |e: FormEvent| {
        e.prevent_default();
        let parsed_options: Vec<String> = options
            .read()
            .split(';')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        let lesson = LessonPath::new(
            course_id.read().trim().to_string(),
            module_id.read().trim().to_string(),
            lesson_id.read().trim().to_string(),
        );

        create_quiz(
            &auth,
            lesson,
            CreateQuizRequest {
                title: title.read().trim().to_string(),
                questions: vec![CreateQuizQuestion {
                    prompt: prompt.read().trim().to_string(),
                    options: parsed_options,
                    correct_index: *correct_index.read(),
                }],
            },
        );
    };

    rsx! {
        div { class: "bg-[#2b2d31] rounded-lg p-5",
            h2 { class: "text-lg font-semibold text-white mb-4", "Quiz builder" }
            form { class: "space-y-3", onsubmit: handle_create,
                div { class: "grid grid-cols-3 gap-2",
                    input {
                        class: "bg-[#1e1f22] border-none rounded p-2 text-white text-sm placeholder-[#949ba4] focus:ring-0",
                        placeholder: "Course id",
                        value: "{course_id}",
                        oninput: move |e: FormEvent| course_id.set(e.value()),
                    }
                    input {
                        class: "bg-[#1e1f22] border-none rounded p-2 text-white text-sm placeholder-[#949ba4] focus:ring-0",
                        placeholder: "Module id",
                        value: "{module_id}",
                        oninput: move |e: FormEvent| module_id.set(e.value()),
                    }
                    input {
                        class: "bg-[#1e1f22] border-none rounded p-2 text-white text-sm placeholder-[#949ba4] focus:ring-0",
                        placeholder: "Lesson id",
                        value: "{lesson_id}",
                        oninput: move |e: FormEvent| lesson_id.set(e.value()),
                    }
                }
                input {
                    class: "w-full bg-[#1e1f22] border-none rounded p-2 text-white text-sm placeholder-[#949ba4] focus:ring-0",
                    placeholder: "Quiz title",
                    value: "{title}",
                    oninput: move |e: FormEvent| title.set(e.value()),
                }
                input {
                    class: "w-full bg-[#1e1f22] border-none rounded p-2 text-white text-sm placeholder-[#949ba4] focus:ring-0",
                    placeholder: "Question prompt",
                    value: "{prompt}",
                    oninput: move |e: FormEvent| prompt.set(e.value()),
                }
                input {
                    class: "w-full bg-[#1e1f22] border-none rounded p-2 text-white text-sm placeholder-[#949ba4] focus:ring-0",
                    placeholder: "Options, separated by ;",
                    value: "{options}",
                    oninput: move |e: FormEvent| options.set(e.value()),
                }
                div { class: "flex items-center gap-2",
                    label { class: "text-sm text-gray-400", "Correct option #" }
                    input {
                        class: "w-16 bg-[#1e1f22] border-none rounded p-2 text-white text-sm focus:ring-0",
                        r#type: "number",
                        min: "0",
                        value: "{correct_index}",
                        oninput: move |e: FormEvent| {
                            correct_index.set(e.value().parse().unwrap_or(0));
                        },
                    }
                }
                button {
                    r#type: "submit",
                    class: "w-full px-4 py-2 bg-indigo-500 hover:bg-indigo-600 text-white rounded text-sm transition-colors",
                    "Create quiz"
                }
            }
        }
    }
}
