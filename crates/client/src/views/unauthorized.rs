//! Fixed landing page for denied access.

use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn Unauthorized() -> Element {
    rsx! {
        div { class: "flex flex-col items-center justify-center py-24 text-center",
            h1 { class: "text-3xl font-bold text-white mb-2", "No access" }
            p { class: "text-gray-400 mb-6", "Your account doesn't have permission to view that page." }
            Link {
                to: Route::Catalog {},
                class: "px-4 py-2 bg-indigo-500 hover:bg-indigo-600 text-white rounded-lg transition-colors",
                "Back to the catalog"
            }
        }
    }
}
