//! Cart page: line items, coupon entry, checkout hand-off.

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::stores::cart::{apply_coupon, checkout, fetch_cart, remove_from_cart, CART, CHECKOUT};
use crate::stores::courses::format_price;
use crate::stores::SliceStatus;
use crate::Route;

#[component]
pub fn CartView() -> Element {
    let auth = use_context::<AuthContext>();
    let mut coupon_code = use_signal(String::new);

    use_effect(move || {
        if auth.session.read().is_some() {
            fetch_cart(&auth);
        }
    });

    if !auth.is_authenticated() {
        return rsx! {
            div { class: "max-w-3xl mx-auto px-4 py-16 text-center text-gray-400",
                "Sign in to see your cart. "
                Link { to: Route::Login {}, class: "text-indigo-400 hover:underline", "Sign in" }
            }
        };
    }

    let checking_out = CHECKOUT.read().is_pending();

    rsx! {
        div { class: "max-w-3xl mx-auto px-4 py-8",
            h1 { class: "text-2xl font-bold text-white mb-6", "Your cart" }

            match CART.read().status() {
                SliceStatus::Idle | SliceStatus::Pending => rsx! {
                    div { class: "text-gray-400 py-12 text-center", "Loading cart..." }
                },
                SliceStatus::Rejected(message) => rsx! {
                    div { class: "p-4 bg-red-500/10 border border-red-500/30 rounded-lg text-red-400",
                        "{message}"
                        button {
                            class: "ml-3 text-sm underline",
                            onclick: move |_| fetch_cart(&auth),
                            "Retry"
                        }
                    }
                },
                SliceStatus::Fulfilled => {
                    let cart = CART.read().data().cloned().unwrap_or_default();
                    let subtotal = format_price(cart.subtotal_cents);
                    let discount = format_price(cart.discount_cents);
                    let total = format_price(cart.total_cents);
                    rsx! {
                        if cart.items.is_empty() {
                            div { class: "text-gray-400 py-12 text-center",
                                "Nothing here yet. "
                                Link { to: Route::Catalog {}, class: "text-indigo-400 hover:underline",
                                    "Browse the catalog"
                                }
                            }
                        } else {
                            div { class: "space-y-2 mb-6",
                                for item in cart.items.iter() {
                                    div {
                                        key: "{item.id}",
                                        class: "flex items-center justify-between bg-[#2b2d31] rounded-lg p-4",
                                        div {
                                            div { class: "text-white font-medium", "{item.title}" }
                                            div { class: "text-sm text-indigo-300",
                                                {format_price(item.price_cents)}
                                            }
                                        }
                                        button {
                                            class: "text-sm text-gray-400 hover:text-red-400 transition-colors",
                                            onclick: {
                                                let item_id = item.id.clone();
                                                move |_| remove_from_cart(&auth, item_id.clone())
                                            },
                                            "Remove"
                                        }
                                    }
                                }
                            }

                            div { class: "flex gap-2 mb-6",
                                input {
                                    class: "flex-1 bg-[#1e1f22] border-none rounded p-2.5 text-white placeholder-[#949ba4] focus:ring-0",
                                    placeholder: "Coupon code",
                                    value: "{coupon_code}",
                                    oninput: move |e: FormEvent| coupon_code.set(e.value()),
                                }
                                button {
                                    class: "px-4 py-2 bg-[#404249] hover:bg-[#4e5058] text-white rounded transition-colors",
                                    onclick: move |_| apply_coupon(&auth, coupon_code.read().clone()),
                                    "Apply"
                                }
                            }

                            div { class: "bg-[#2b2d31] rounded-lg p-4 space-y-1 text-sm",
                                div { class: "flex justify-between text-gray-300",
                                    span { "Subtotal" }
                                    span { "{subtotal}" }
                                }
                                if cart.discount_cents > 0 {
                                    div { class: "flex justify-between text-green-400",
                                        span {
                                            "Discount"
                                            if let Some(code) = cart.coupon_code.as_ref() {
                                                " ({code})"
                                            }
                                        }
                                        span { "-{discount}" }
                                    }
                                }
                                div { class: "flex justify-between text-white font-semibold text-base pt-2 border-t border-[#3f4147]",
                                    span { "Total" }
                                    span { "{total}" }
                                }
                            }

                            button {
                                class: "w-full mt-6 px-4 py-3 bg-indigo-500 hover:bg-indigo-600 text-white font-medium rounded-lg transition-colors disabled:opacity-50",
                                disabled: checking_out,
                                onclick: move |_| checkout(&auth),
                                if checking_out { "Redirecting to payment..." } else { "Checkout" }
                            }
                        }
                    }
                }
            }
        }
    }
}
