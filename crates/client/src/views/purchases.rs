//! Purchase history.

use dioxus::prelude::*;
use learnhub_shared::OrderStatus;

use crate::auth_session::AuthContext;
use crate::stores::courses::format_price;
use crate::stores::purchases::{fetch_purchases, PURCHASES};
use crate::stores::SliceStatus;
use crate::Route;

fn status_label(status: &OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Pending",
        OrderStatus::Paid => "Paid",
        OrderStatus::Failed => "Failed",
        OrderStatus::Refunded => "Refunded",
    }
}

#[component]
pub fn Purchases() -> Element {
    let auth = use_context::<AuthContext>();

    use_effect(move || {
        if auth.session.read().is_some() {
            fetch_purchases(&auth);
        }
    });

    if !auth.is_authenticated() {
        return rsx! {
            div { class: "max-w-3xl mx-auto px-4 py-16 text-center text-gray-400",
                "Sign in to see your purchase history. "
                Link { to: Route::Login {}, class: "text-indigo-400 hover:underline", "Sign in" }
            }
        };
    }

    rsx! {
        div { class: "max-w-4xl mx-auto px-4 py-8",
            h1 { class: "text-2xl font-bold text-white mb-6", "Purchase history" }

            match PURCHASES.read().status() {
                SliceStatus::Idle | SliceStatus::Pending => rsx! {
                    div { class: "text-gray-400 py-12 text-center", "Loading orders..." }
                },
                SliceStatus::Rejected(message) => rsx! {
                    div { class: "p-4 bg-red-500/10 border border-red-500/30 rounded-lg text-red-400",
                        "{message}"
                        button {
                            class: "ml-3 text-sm underline",
                            onclick: move |_| fetch_purchases(&auth),
                            "Retry"
                        }
                    }
                },
                SliceStatus::Fulfilled => rsx! {
                    {
                        let orders = PURCHASES.read().data().cloned().unwrap_or_default();
                        rsx! {
                            if orders.is_empty() {
                                div { class: "text-gray-400 py-12 text-center", "No orders yet." }
                            } else {
                                div { class: "space-y-3",
                                    for order in orders.iter() {
                                        {
                                            let total = format_price(order.total_cents);
                                            let placed = order.created_at.format("%b %e, %Y").to_string();
                                            rsx! {
                                                div {
                                                    key: "{order.id}",
                                                    class: "bg-[#2b2d31] rounded-lg p-4",
                                                    div { class: "flex items-center justify-between mb-2",
                                                        span { class: "text-white font-medium", "Order {order.id}" }
                                                        span { class: "text-sm text-gray-400", "{placed}" }
                                                    }
                                                    for item in order.items.iter() {
                                                        div { class: "text-sm text-gray-300", "{item.course_title}" }
                                                    }
                                                    div { class: "flex items-center justify-between mt-2 pt-2 border-t border-[#3f4147]",
                                                        span { class: "text-sm text-gray-400",
                                                            {status_label(&order.status)}
                                                        }
                                                        span { class: "text-indigo-300 font-medium", "{total}" }
                                                    }
                                                }
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
