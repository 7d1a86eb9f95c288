//! Registration view with the OTP verification step.

use dioxus::prelude::*;
use learnhub_shared::{
    validate_email, validate_otp_code, validate_password, AuthResponse, RegisterRequest,
    ResendOtpRequest, VerifyOtpRequest,
};

use crate::auth_session::AuthContext;
use crate::stores::toasts;
use crate::Route;

#[derive(Clone, PartialEq)]
enum Step {
    Details,
    /// Account created; waiting for the emailed code.
    Verify { email: String },
}

#[component]
pub fn Register() -> Element {
    let auth = use_context::<AuthContext>();
    let nav = use_navigator();
    let mut step = use_signal(|| Step::Details);

    let mut full_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut code = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut is_loading = use_signal(|| false);

    let handle_register = move |e: FormEvent| {
        e.prevent_default();
        let name_value = full_name.read().trim().to_string();
        let email_value = email.read().trim().to_string();
        let password_value = password.read().clone();

        if name_value.is_empty() {
            error.set(Some("Name is required".to_string()));
            return;
        }
        if !validate_email(&email_value) {
            error.set(Some("Enter a valid email address".to_string()));
            return;
        }
        if !validate_password(&password_value) {
            error.set(Some("Password must be at least 8 characters".to_string()));
            return;
        }

        is_loading.set(true);
        let auth = auth;
        spawn(async move {
            let client = auth.client();
            let request = RegisterRequest {
                full_name: name_value,
                email: email_value.clone(),
                password: password_value,
            };
            match client.post_json::<_, ()>("/auth/register", &request).await {
                Ok(()) => {
                    step.set(Step::Verify { email: email_value });
                    is_loading.set(false);
                }
                Err(err) => {
                    error.set(Some(err.user_message()));
                    is_loading.set(false);
                }
            }
        });
    };

    let handle_verify = move |e: FormEvent| {
        e.prevent_default();
        let Step::Verify { email: email_value } = step.read().clone() else {
            return;
        };
        let code_value = code.read().trim().to_string();

        if !validate_otp_code(&code_value) {
            error.set(Some("The code is 6 digits".to_string()));
            return;
        }

        is_loading.set(true);
        let mut auth = auth;
        spawn(async move {
            let client = auth.client();
            let request = VerifyOtpRequest {
                email: email_value,
                code: code_value,
            };
            match client
                .post_json::<_, AuthResponse>("/auth/verify-otp", &request)
                .await
            {
                Ok(response) => {
                    let role_id = response
                        .user
                        .role_id
                        .or_else(|| response.user.roles.first().map(|r| r.id));
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

    let handle_resend = move |_| {
        let Step::Verify { email: email_value } = step.read().clone() else {
            return;
        };
        let auth = auth;
        spawn(async move {
            let client = auth.client();
            let request = ResendOtpRequest { email: email_value };
            match client.post_json::<_, ()>("/auth/resend-otp", &request).await {
                Ok(()) => toasts::info("A new code is on its way"),
                Err(err) => toasts::error(err.user_message()),
            }
        });
    };

    rsx! {
        div { class: "flex items-center justify-center py-16",
            div { class: "bg-[#2b2d31] rounded-lg shadow-2xl w-full max-w-md p-8",
                match step.read().clone() {
                    Step::Details => rsx! {
                        h2 { class: "text-2xl font-bold text-white mb-6", "Create your account" }
                        form { onsubmit: handle_register,
                            div { class: "space-y-4",
                                div {
                                    label { class: "block text-sm font-medium text-gray-300 mb-2", "Full name" }
                                    input {
                                        class: "w-full bg-[#1e1f22] border-none rounded p-2.5 text-white placeholder-[#949ba4] focus:ring-0",
                                        placeholder: "Ada Lovelace",
                                        value: "{full_name}",
                                        oninput: move |e: FormEvent| {
                                            full_name.set(e.value());
                                            error.set(None);
                                        },
                                    }
                                }
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
                                    if *is_loading.read() { "Creating..." } else { "Create account" }
                                }
                            }
                        }
                        p { class: "text-sm text-gray-400 mt-6 text-center",
                            "Already have an account? "
                            Link { to: Route::Login {}, class: "text-indigo-400 hover:underline", "Sign in" }
                        }
                    },
                    Step::Verify { email: pending_email } => rsx! {
                        h2 { class: "text-2xl font-bold text-white mb-2", "Check your inbox" }
                        p { class: "text-sm text-gray-400 mb-6",
                            "We sent a 6-digit code to {pending_email}."
                        }
                        form { onsubmit: handle_verify,
                            div { class: "space-y-4",
                                input {
                                    class: "w-full bg-[#1e1f22] border-none rounded p-2.5 text-white text-center text-xl tracking-[0.5em] focus:ring-0",
                                    maxlength: "6",
                                    placeholder: "000000",
                                    value: "{code}",
                                    oninput: move |e: FormEvent| {
                                        code.set(e.value());
                                        error.set(None);
                                    },
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
                                    if *is_loading.read() { "Verifying..." } else { "Verify" }
                                }
                                button {
                                    r#type: "button",
                                    class: "w-full px-4 py-2 text-gray-400 hover:text-white text-sm transition-colors",
                                    onclick: handle_resend,
                                    "Resend code"
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}
