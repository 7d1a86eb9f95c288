//! Login view: email/password plus OAuth hand-off.

use dioxus::prelude::*;
use learnhub_shared::{validate_email, AuthResponse, LoginRequest};

use crate::auth_session::AuthContext;
use crate::navigation;
use crate::Route;

fn role_id_from(response: &AuthResponse) -> Option<i64> {
    response
        .user
        .role_id
        .or_else(|| response.user.roles.first().map(|r| r.id))
}

#[component]
pub fn Login() -> Element {
    let auth = use_context::<AuthContext>();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut is_loading = use_signal(|| false);

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let email_value = email.read().trim().to_string();
        let password_value = password.read().clone();

        if !validate_email(&email_value) {
            error.set(Some("Enter a valid email address".to_string()));
            return;
        }
        if password_value.is_empty() {
            error.set(Some("Password is required".to_string()));
            return;
        }

        is_loading.set(true);
        let mut auth = auth;
        spawn(async move {
            let client = auth.client();
            match client
                .post_json::<_, AuthResponse>(
                    "/auth/login",
                    &LoginRequest {
                        email: email_value,
                        password: password_value,
                    },
                )
                .await
            {
                Ok(response) => {
                    let role_id = role_id_from(&response);
                    auth.login(response.access_token, role_id);
                    nav.push(Route::Catalog {});
                }
                Err(err) => {
                    error.set(Some(err.user_message()));
                    is_loading.set(false);
                }
            }
        });
    };

    let oauth = move |provider: &'static str| {
        let url = auth.api_url(&format!("/auth/oauth/{provider}"));
        navigation::redirect_external(&url);
    };

    rsx! {
        div { class: "flex items-center justify-center py-16",
            div { class: "bg-[#2b2d31] rounded-lg shadow-2xl w-full max-w-md p-8",
                h2 { class: "text-2xl font-bold text-white mb-6", "Welcome back" }
                form { onsubmit: handle_submit,
                    div { class: "space-y-4",
                        div {
                            label { class: "block text-sm font-medium text-gray-300 mb-2", "Email" }
                            input {
                                class: "w-full bg-[#1e1f22] border-none rounded p-2.5 text-white placeholder-[#949ba4] focus:ring-0",
                                r#type: "email",
                                placeholder: "you@example.com",
                                value: "{email}",
                                oninput: move |e: FormEvent| {
                                    email.set(e.value());
                                    error.set(None);
                                },
                            }
                        }
                        div {
                            label { class: "block text-sm font-medium text-gray-300 mb-2", "Password" }
                            input {
                                class: "w-full bg-[#1e1f22] border-none rounded p-2.5 text-white placeholder-[#949ba4] focus:ring-0",
                                r#type: "password",
                                value: "{password}",
                                oninput: move |e: FormEvent| {
                                    password.set(e.value());
                                    error.set(None);
                                },
                            }
                        }
                        if let Some(err) = error.read().as_ref() {
                            div { class: "p-3 bg-red-500/10 border border-red-500/30 rounded-lg text-red-400 text-sm",
                                "{err}"
                            }
                        }
                        button {
                            r#type: "submit",
                            class: "w-full px-4 py-2.5 bg-indigo-500 hover:bg-indigo-600 text-white rounded-lg transition-colors disabled:opacity-50",
                            disabled: *is_loading.read(),
                            if *is_loading.read() { "Signing in..." } else { "Sign in" }
                        }
                    }
                }
                div { class: "flex items-center gap-3 my-6 text-xs text-gray-500",
                    div { class: "flex-1 h-px bg-[#3f4147]" }
                    "or continue with"
                    div { class: "flex-1 h-px bg-[#3f4147]" }
                }
                div { class: "flex gap-3",
                    button {
                        class: "flex-1 px-4 py-2 bg-[#1e1f22] hover:bg-[#35373c] text-gray-200 rounded-lg text-sm transition-colors",
                        onclick: move |_| oauth("google"),
                        "Google"
                    }
                    button {
                        class: "flex-1 px-4 py-2 bg-[#1e1f22] hover:bg-[#35373c] text-gray-200 rounded-lg text-sm transition-colors",
                        onclick: move |_| oauth("github"),
                        "GitHub"
                    }
                }
                p { class: "text-sm text-gray-400 mt-6 text-center",
                    "New here? "
                    Link { to: Route::Register {}, class: "text-indigo-400 hover:underline", "Create an account" }
                }
            }
        }
    }
}
