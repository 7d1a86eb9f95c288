//! Global stores for application state.
//!
//! Each remote resource owns one [`slice::Slice`] wrapped in a
//! `GlobalSignal`, plus free fetch functions that drive its lifecycle.

pub mod cart;
pub mod categories;
pub mod chat;
pub mod coupons;
pub mod courses;
pub mod my_learning;
pub mod profile;
pub mod purchases;
pub mod quizzes;
pub mod slice;
pub mod toasts;

pub use slice::{Slice, SliceStatus};

/// Reset every slice to idle. Runs on session teardown so no page
/// keeps showing another user's data.
pub fn reset_all() {
    cart::CART.write().reset();
    cart::CHECKOUT.write().reset();
    categories::CATEGORIES.write().reset();
    courses::COURSES.write().reset();
    coupons::COUPONS.write().reset();
    my_learning::MY_LEARNING.write().reset();
    profile::PROFILE.write().reset();
    purchases::PURCHASES.write().reset();
    quizzes::QUIZZES.write().reset();
    quizzes::QUIZ_RESULT.write().reset();
    chat::reset();
}
