//! View components for the application.

pub mod admin_coupons;
pub mod cart_view;
pub mod catalog;
pub mod chat_view;
pub mod instructor;
pub mod login;
pub mod my_learning;
pub mod purchases;
pub mod quiz_view;
pub mod register;
pub mod unauthorized;

pub use admin_coupons::AdminCoupons;
pub use cart_view::CartView;
pub use catalog::Catalog;
pub use chat_view::ChatView;
pub use instructor::InstructorDashboard;
pub use login::Login;
pub use my_learning::MyLearning;
pub use purchases::Purchases;
pub use quiz_view::QuizView;
pub use register::Register;
pub use unauthorized::Unauthorized;
