//! Application routing configuration.

use dioxus::prelude::*;

use crate::components::NavbarLayout;
use crate::views::{
    AdminCoupons, CartView, Catalog, ChatView, InstructorDashboard, Login, MyLearning, Purchases,
    QuizView, Register, Unauthorized,
};

// Router configuration
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(NavbarLayout)]
        #[route("/")]
        Catalog {},

        // Auth routes
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},

        // Storefront
        #[route("/cart")]
        CartView {},
        #[route("/purchases")]
        Purchases {},

        // Learning
        #[route("/my-learning")]
        MyLearning {},
        #[route("/learn/:course_id/:module_id/:lesson_id/quiz")]
        QuizView { course_id: String, module_id: String, lesson_id: String },

        // Community
        #[route("/chat")]
        ChatView {},

        // Protected dashboards
        #[route("/instructor")]
        InstructorDashboard {},
        #[route("/admin/coupons")]
        AdminCoupons {},

        #[route("/unauthorized")]
        Unauthorized {},
}
