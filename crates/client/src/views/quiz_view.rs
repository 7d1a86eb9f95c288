//! Quiz page for one lesson: answer questions, submit, see the score.

use std::collections::HashMap;

use dioxus::prelude::*;
use learnhub_shared::{QuizAnswer, QuizSubmission};

use crate::auth_session::AuthContext;
use crate::stores::quizzes::{fetch_quizzes, submit_quiz, LessonPath, QUIZZES, QUIZ_RESULT};
use crate::stores::SliceStatus;
use crate::Route;

#[component]
pub fn QuizView(course_id: String, module_id: String, lesson_id: String) -> Element {
    let auth = use_context::<AuthContext>();
    // question id -> selected option index
    let mut answers = use_signal(HashMap::<String, u32>::new);

    let lesson = LessonPath::new(course_id.clone(), module_id.clone(), lesson_id.clone());
    let mut lesson_tracker = use_signal(|| lesson.clone());
    if *lesson_tracker.peek() != lesson {
        lesson_tracker.set(lesson.clone());
    }

    use_effect(move || {
        let lesson = lesson_tracker.read().clone();
        if auth.session.read().is_some() {
            QUIZ_RESULT.write().reset();
            fetch_quizzes(&auth, &lesson);
        }
    });

    if !auth.is_authenticated() {
        return rsx! {
            div { class: "max-w-3xl mx-auto px-4 py-16 text-center text-gray-400",
                "Sign in to take quizzes. "
                Link { to: Route::Login {}, class: "text-indigo-400 hover:underline", "Sign in" }
            }
        };
    }

    rsx! {
        div { class: "max-w-3xl mx-auto px-4 py-8",
            h1 { class: "text-2xl font-bold text-white mb-6", "Lesson quiz" }

            if let Some(result) = QUIZ_RESULT.read().data() {
                div { class: "p-4 mb-6 bg-green-500/10 border border-green-500/30 rounded-lg text-green-300",
                    "Score: {result.score} / {result.total}"
                }
            }

            match QUIZZES.read().status() {
                SliceStatus::Idle | SliceStatus::Pending => rsx! {
                    div { class: "text-gray-400 py-12 text-center", "Loading quiz..." }
                },
                SliceStatus::Rejected(message) => rsx! {
                    div { class: "p-4 bg-red-500/10 border border-red-500/30 rounded-lg text-red-400",
                        "{message}"
                    }
                },
                SliceStatus::Fulfilled => rsx! {
                    {
                        let quizzes = QUIZZES.read().data().cloned().unwrap_or_default();
                        rsx! {
                            if quizzes.is_empty() {
                                div { class: "text-gray-400 py-12 text-center",
                                    "This lesson has no quiz."
                                }
                            } else {
                                for quiz in quizzes.iter() {
                                    div { key: "{quiz.id}", class: "mb-8",
                                        h2 { class: "text-lg font-semibold text-white mb-4", "{quiz.title}" }
                                        div { class: "space-y-4",
                                            for question in quiz.questions.iter() {
                                                div {
                                                    key: "{question.id}",
                                                    class: "bg-[#2b2d31] rounded-lg p-4",
                                                    p { class: "text-gray-200 mb-3", "{question.prompt}" }
                                                    for (index, option) in question.options.iter().enumerate() {
                                                        label { class: "flex items-center gap-3 py-1.5 cursor-pointer text-sm text-gray-300 hover:text-white",
                                                            input {
                                                                r#type: "radio",
                                                                name: "{question.id}",
                                                                checked: answers.read().get(&question.id) == Some(&(index as u32)),
                                                                onchange: {
                                                                    let question_id = question.id.clone();
                                                                    move |_| {
                                                                        answers.write().insert(question_id.clone(), index as u32);
                                                                    }
                                                                },
                                                            }
                                                            "{option}"
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                        button {
                                            class: "mt-4 px-4 py-2 bg-indigo-500 hover:bg-indigo-600 text-white rounded-lg transition-colors disabled:opacity-50",
                                            disabled: QUIZ_RESULT.read().is_pending(),
                                            onclick: {
                                                let quiz = quiz.clone();
                                                move |_| {
                                                    let selected = answers.read().clone();
                                                    let submission = QuizSubmission {
                                                        answers: quiz
                                                            .questions
                                                            .iter()
                                                            .filter_map(|q| {
                                                                selected.get(&q.id).map(|&selected_index| QuizAnswer {
                                                                    question_id: q.id.clone(),
                                                                    selected_index,
                                                                })
                                                            })
                                                            .collect(),
                                                    };
                                                    submit_quiz(&auth, quiz.id.clone(), submission);
                                                }
                                            },
                                            if QUIZ_RESULT.read().is_pending() { "Submitting..." } else { "Submit answers" }
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
