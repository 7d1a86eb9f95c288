//! Shared data models for the learnhub REST API.
//!
//! Everything here mirrors the server's JSON shapes. Fields the server
//! may omit carry `#[serde(default)]` so older API versions keep
//! decoding; the client normalizes these raw records into its own
//! snapshot types at the slice boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Users & Roles ---

/// Raw user record as returned by `GET /users/me`.
///
/// Role information may arrive as a bare `roleId`, as a `roles` array,
/// or not at all; the client's role resolver owns the fallback chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub roles: Vec<RoleEntry>,
    #[serde(default)]
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleEntry {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

// --- Auth Request/Response Types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendOtpRequest {
    pub email: String,
}

// --- Categories ---

/// Raw category record. `localizedName` wins over `name` for display;
/// the client sorts the normalized list by that display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub localized_name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub course_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub localized_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub localized_name: Option<String>,
    pub description: Option<String>,
}

// --- Courses ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub instructor_name: Option<String>,
    /// Price in the smallest currency unit.
    #[serde(default)]
    pub price_cents: i64,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourse {
    pub course: CourseSummary,
    #[serde(default)]
    pub progress_percent: f32,
    /// Resume point, when the server tracks one.
    #[serde(default)]
    pub current_module_id: Option<String>,
    #[serde(default)]
    pub current_lesson_id: Option<String>,
    pub enrolled_at: DateTime<Utc>,
}

// --- Cart & Checkout ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub id: String,
    pub course: CourseSummary,
    pub price_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartDto {
    #[serde(default)]
    pub items: Vec<CartItemDto>,
    #[serde(default)]
    pub subtotal_cents: i64,
    #[serde(default)]
    pub discount_cents: i64,
    #[serde(default)]
    pub total_cents: i64,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub course_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCouponRequest {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub item_ids: Vec<String>,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

/// Checkout response. A missing `paymentUrl` on a 2xx response is a
/// business failure, not a transport one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub payment_url: Option<String>,
}

// --- Orders ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: String,
    pub total_cents: i64,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItemDto>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub course_id: String,
    pub course_title: String,
    pub price_cents: i64,
}

// --- Coupons ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CouponDto {
    pub id: String,
    pub code: String,
    pub discount_percent: u8,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCouponRequest {
    pub code: String,
    pub discount_percent: u8,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

// --- Quizzes ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizDto {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<QuizQuestionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionDto {
    pub id: String,
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    pub title: String,
    pub questions: Vec<CreateQuizQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    /// question id -> selected option index, in question order.
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
    pub question_id: String,
    pub selected_index: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultDto {
    pub score: u32,
    pub total: u32,
}

// --- Chat ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDto {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub members: Vec<ChatMember>,
    #[serde(default)]
    pub last_message: Option<ChatMessageDto>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMember {
    pub user_id: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDto {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

// --- Form validation ---
//
// Client-side checks that run before any request is sent. Kept in the
// shared crate so request builders and views agree on the rules.

/// Minimal structural email check: one `@`, non-empty local part, a dot
/// in the domain.
pub fn validate_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(' ')
}

/// Passwords must be at least 8 characters.
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= 8
}

/// OTP codes are exactly 6 ASCII digits.
pub fn validate_otp_code(code: &str) -> bool {
    code.len() == 6 && code.chars().all(|c| c.is_ascii_digit())
}

/// Coupon discounts are whole percentages in 1..=100.
pub fn validate_discount_percent(percent: u8) -> bool {
    (1..=100).contains(&percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(validate_email("student@example.com"));
        assert!(validate_email("  padded@uni.edu "));
        assert!(!validate_email("no-at-sign"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@nodot"));
        assert!(!validate_email("user@.com"));
        assert!(!validate_email("has space@example.com"));
    }

    #[test]
    fn otp_validation() {
        assert!(validate_otp_code("123456"));
        assert!(!validate_otp_code("12345"));
        assert!(!validate_otp_code("12345a"));
    }

    #[test]
    fn discount_validation() {
        assert!(validate_discount_percent(1));
        assert!(validate_discount_percent(100));
        assert!(!validate_discount_percent(0));
        assert!(!validate_discount_percent(101));
    }

    #[test]
    fn profile_decodes_without_role_fields() {
        let json = r#"{
            "id": "u1",
            "email": "a@b.com",
            "createdAt": "2025-01-01T00:00:00Z"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.role_id, None);
        assert!(profile.roles.is_empty());
        assert!(!profile.email_verified);
    }
}
