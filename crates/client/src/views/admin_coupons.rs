//! Coupon administration, admin-only.

use dioxus::prelude::*;
use learnhub_shared::CreateCouponRequest;

use crate::auth_session::AuthContext;
use crate::components::{Capability, RequireRole};
use crate::stores::coupons::{create_coupon, delete_coupon, fetch_coupons, COUPONS};
use crate::stores::SliceStatus;

#[component]
pub fn AdminCoupons() -> Element {
    rsx! {
        RequireRole { capability: Capability::AdminOnly,
            CouponsContent {}
        }
    }
}

#[component]
fn CouponsContent() -> Element {
    let auth = use_context::<AuthContext>();
    let mut code = use_signal(String::new);
    let mut percent = use_signal(|| 10u8);

    use_effect(move || {
        if auth.session.read().is_some() {
            fetch_coupons(&auth);
        }
    });

    let handle_create = move |e: FormEvent| {
        e.prevent_default();
        create_coupon(
            &auth,
            CreateCouponRequest {
                code: code.read().trim().to_uppercase(),
                discount_percent: *percent.read(),
                expires_at: None,
            },
        );
        code.set(String::new());
    };

    rsx! {
        div { class: "max-w-3xl mx-auto px-4 py-8",
            h1 { class: "text-2xl font-bold text-white mb-6", "Coupons" }

            form { class: "flex gap-2 mb-6", onsubmit: handle_create,
                input {
                    class: "flex-1 bg-[#1e1f22] border-none rounded p-2.5 text-white placeholder-[#949ba4] focus:ring-0",
                    placeholder: "CODE",
                    value: "{code}",
                    oninput: move |e: FormEvent| code.set(e.value()),
                }
                input {
                    class: "w-24 bg-[#1e1f22] border-none rounded p-2.5 text-white focus:ring-0",
                    r#type: "number",
                    min: "1",
                    max: "100",
                    value: "{percent}",
                    oninput: move |e: FormEvent| {
                        percent.set(e.value().parse().unwrap_or(10));
                    },
                }
                span { class: "self-center text-gray-400 text-sm", "%" }
                button {
                    r#type: "submit",
                    class: "px-4 py-2 bg-indigo-500 hover:bg-indigo-600 text-white rounded transition-colors",
                    "Create"
                }
            }

            match COUPONS.read().status() {
                SliceStatus::Idle | SliceStatus::Pending => rsx! {
                    div { class: "text-gray-400 py-12 text-center", "Loading coupons..." }
                },
                SliceStatus::Rejected(message) => rsx! {
                    div { class: "p-4 bg-red-500/10 border border-red-500/30 rounded-lg text-red-400",
                        "{message}"
                        button {
                            class: "ml-3 text-sm underline",
                            onclick: move |_| fetch_coupons(&auth),
                            "Retry"
                        }
                    }
                },
                SliceStatus::Fulfilled => rsx! {
                    div { class: "space-y-2",
                        for coupon in COUPONS.read().data().cloned().unwrap_or_default() {
                            div {
                                key: "{coupon.id}",
                                class: "flex items-center justify-between bg-[#2b2d31] rounded-lg p-4",
                                div {
                                    span { class: "text-white font-mono font-medium mr-3", "{coupon.code}" }
                                    span { class: "text-sm text-indigo-300", "{coupon.discount_percent}% off" }
                                    if !coupon.active {
                                        span { class: "ml-3 text-xs text-gray-500 uppercase", "inactive" }
                                    }
                                }
                                button {
                                    class: "text-sm text-gray-400 hover:text-red-400 transition-colors",
                                    onclick: {
                                        let id = coupon.id.clone();
                                        move |_| delete_coupon(&auth, id.clone())
                                    },
                                    "Delete"
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
