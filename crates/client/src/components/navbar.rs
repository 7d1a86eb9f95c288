//! Top navigation shell wrapped around every route.

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::components::Toaster;
use crate::roles::{self, Role};
use crate::stores::cart::CART;
use crate::stores::profile::PROFILE;
use crate::Route;

#[component]
fn NavLink(to: Route, label: String) -> Element {
    rsx! {
        Link {
            to,
            class: "px-3 py-2 rounded text-sm font-medium text-[#b5bac1] hover:bg-[#35373c] hover:text-white transition-colors",
            "{label}"
        }
    }
}

#[component]
pub fn NavbarLayout() -> Element {
    let mut auth = use_context::<AuthContext>();
    let nav = use_navigator();

    let authenticated = auth.is_authenticated();
    let resolution = roles::resolve(&PROFILE.read(), auth.cached_role_id());
    let cart_count = CART
        .read()
        .data()
        .map(|cart| cart.items.len())
        .unwrap_or(0);

    rsx! {
        div { class: "min-h-screen bg-[#313338] text-white",
            nav { class: "flex items-center gap-1 px-4 py-3 bg-[#2b2d31] border-b border-[#1e1f22]",
                Link { to: Route::Catalog {}, class: "text-lg font-bold text-white mr-4",
                    "learnhub"
                }
                NavLink { to: Route::Catalog {}, label: "Catalog" }
                if authenticated {
                    NavLink { to: Route::MyLearning {}, label: "My Learning" }
                    NavLink { to: Route::Purchases {}, label: "Purchases" }
                    NavLink { to: Route::ChatView {}, label: "Chat" }
                }
                if !resolution.loading {
                    if matches!(resolution.role, Some(Role::Instructor) | Some(Role::Admin)) {
                        NavLink { to: Route::InstructorDashboard {}, label: "Instructor" }
                    }
                    if matches!(resolution.role, Some(Role::Admin)) {
                        NavLink { to: Route::AdminCoupons {}, label: "Coupons" }
                    }
                }
                div { class: "flex-1" }
                if authenticated {
                    Link {
                        to: Route::CartView {},
                        class: "relative px-3 py-2 rounded text-sm text-[#b5bac1] hover:text-white",
                        "Cart"
                        if cart_count > 0 {
                            span { class: "absolute -top-1 -right-1 bg-indigo-500 text-white text-xs rounded-full px-1.5",
                                "{cart_count}"
                            }
                        }
                    }
                    button {
                        class: "px-3 py-2 rounded text-sm text-[#b5bac1] hover:text-white transition-colors",
                        onclick: move |_| {
                            auth.logout();
                            nav.push(Route::Login {});
                        },
                        "Log out"
                    }
                } else {
                    NavLink { to: Route::Login {}, label: "Log in" }
                    NavLink { to: Route::Register {}, label: "Sign up" }
                }
            }
            Outlet::<Route> {}
            Toaster {}
        }
    }
}
