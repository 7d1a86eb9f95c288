//! Coupon management slice (admin surface).

use dioxus::prelude::*;
use learnhub_shared::{validate_discount_percent, CouponDto, CreateCouponRequest};

use crate::auth_session::AuthContext;
use crate::stores::slice::Slice;
use crate::stores::toasts;

pub static COUPONS: GlobalSignal<Slice<Vec<CouponDto>>> = Signal::global(Slice::new);

pub fn fetch_coupons(auth: &AuthContext) {
    let ticket = COUPONS.write().begin();
    let client = auth.client();

    spawn(async move {
        match client.get_json::<Vec<CouponDto>>("/coupons").await {
            Ok(coupons) => {
                COUPONS.write().fulfill(ticket, coupons);
            }
            Err(err) => {
                let message = err.user_message();
                toasts::error(&message);
                COUPONS.write().reject(ticket, message);
            }
        }
    });
}

/// Validate locally, create, then refresh the list.
pub fn create_coupon(auth: &AuthContext, request: CreateCouponRequest) {
    if request.code.trim().is_empty() {
        toasts::warning("Coupon code is required");
        return;
    }
    if !validate_discount_percent(request.discount_percent) {
        toasts::warning("Discount must be between 1 and 100 percent");
        return;
    }

    let client = auth.client();
    let auth = *auth;

    spawn(async move {
        match client.post_json::<_, CouponDto>("/coupons", &request).await {
            Ok(created) => {
                toasts::success(format!("Coupon {} created", created.code));
                fetch_coupons(&auth);
            }
            Err(err) => toasts::error(err.user_message()),
        }
    });
}

pub fn delete_coupon(auth: &AuthContext, id: String) {
    let client = auth.client();
    let auth = *auth;

    spawn(async move {
        match client.delete(&format!("/coupons/{id}")).await {
            Ok(()) => {
                toasts::success("Coupon deleted");
                fetch_coupons(&auth);
            }
            Err(err) => toasts::error(err.user_message()),
        }
    });
}
