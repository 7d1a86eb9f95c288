//! Cart slice and checkout.
//!
//! Checkout is a terminal effect: a successful response carries an
//! external payment URL and the tab navigates away. An empty cart
//! warns locally and issues no request at all.

use dioxus::prelude::*;
use learnhub_shared::{
    AddCartItemRequest, ApplyCouponRequest, CartDto, CheckoutRequest, CheckoutResponse,
};

use crate::auth_session::AuthContext;
use crate::navigation;
use crate::stores::slice::Slice;
use crate::stores::toasts;

/// UI-shaped cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub thumbnail: Option<String>,
    pub price_cents: i64,
}

/// UI-shaped cart, replaced wholesale on every successful fetch or
/// mutation response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub coupon_code: Option<String>,
}

pub static CART: GlobalSignal<Slice<CartSnapshot>> = Signal::global(Slice::new);

/// Checkout has its own lifecycle so a failed attempt never disturbs
/// the cart snapshot itself.
pub static CHECKOUT: GlobalSignal<Slice<CheckoutResponse>> = Signal::global(Slice::new);

pub fn normalize_cart(raw: CartDto) -> CartSnapshot {
    CartSnapshot {
        items: raw
            .items
            .into_iter()
            .map(|item| CartItem {
                id: item.id,
                course_id: item.course.id,
                title: item.course.title,
                thumbnail: item.course.thumbnail,
                price_cents: item.price_cents,
            })
            .collect(),
        subtotal_cents: raw.subtotal_cents,
        discount_cents: raw.discount_cents,
        total_cents: raw.total_cents,
        coupon_code: raw.coupon_code,
    }
}

pub fn fetch_cart(auth: &AuthContext) {
    let ticket = CART.write().begin();
    let client = auth.client();

    spawn(async move {
        match client.get_json::<CartDto>("/cart").await {
            Ok(raw) => {
                CART.write().fulfill(ticket, normalize_cart(raw));
            }
            Err(err) => {
                let message = err.user_message();
                toasts::error(&message);
                CART.write().reject(ticket, message);
            }
        }
    });
}

/// Add a course; the server answers with the updated cart.
pub fn add_to_cart(auth: &AuthContext, course_id: String) {
    let ticket = CART.write().begin();
    let client = auth.client();

    spawn(async move {
        let request = AddCartItemRequest { course_id };
        match client.post_json::<_, CartDto>("/cart/items", &request).await {
            Ok(raw) => {
                CART.write().fulfill(ticket, normalize_cart(raw));
                toasts::success("Added to cart");
            }
            Err(err) => {
                let message = err.user_message();
                toasts::error(&message);
                CART.write().reject(ticket, message);
            }
        }
    });
}

pub fn remove_from_cart(auth: &AuthContext, item_id: String) {
    let ticket = CART.write().begin();
    let client = auth.client();

    spawn(async move {
        // Delete, then refetch the authoritative cart.
        let result = match client.delete(&format!("/cart/items/{item_id}")).await {
            Ok(()) => client.get_json::<CartDto>("/cart").await,
            Err(err) => Err(err),
        };
        match result {
            Ok(raw) => {
                CART.write().fulfill(ticket, normalize_cart(raw));
            }
            Err(err) => {
                let message = err.user_message();
                toasts::error(&message);
                CART.write().reject(ticket, message);
            }
        }
    });
}

pub fn apply_coupon(auth: &AuthContext, code: String) {
    let code = code.trim().to_string();
    if code.is_empty() {
        toasts::warning("Enter a coupon code first");
        return;
    }

    let ticket = CART.write().begin();
    let client = auth.client();

    spawn(async move {
        let request = ApplyCouponRequest { code };
        match client.post_json::<_, CartDto>("/cart/coupon", &request).await {
            Ok(raw) => {
                CART.write().fulfill(ticket, normalize_cart(raw));
                toasts::success("Coupon applied");
            }
            Err(err) => {
                let message = err.user_message();
                toasts::error(&message);
                CART.write().reject(ticket, message);
            }
        }
    });
}

/// Build the checkout request, or explain why there is nothing to buy.
/// Kept separate from the network path so the empty-cart rule is a
/// plain function.
pub fn build_checkout_request(cart: Option<&CartSnapshot>) -> Result<CheckoutRequest, &'static str> {
    let cart = cart.ok_or("Your cart is empty")?;
    if cart.items.is_empty() {
        return Err("Your cart is empty");
    }
    Ok(CheckoutRequest {
        item_ids: cart.items.iter().map(|item| item.id.clone()).collect(),
        coupon_code: cart.coupon_code.clone(),
    })
}

/// Start checkout. Success redirects the tab to the payment provider;
/// a 2xx response without a payment URL is a business failure.
pub fn checkout(auth: &AuthContext) {
    let request = match build_checkout_request(CART.read().data()) {
        Ok(request) => request,
        Err(warning) => {
            toasts::warning(warning);
            return;
        }
    };

    let ticket = CHECKOUT.write().begin();
    let client = auth.client();

    spawn(async move {
        match client
            .post_json::<_, CheckoutResponse>("/orders/checkout", &request)
            .await
        {
            Ok(response) => match response.payment_url.clone() {
                Some(payment_url) => {
                    CHECKOUT.write().fulfill(ticket, response);
                    navigation::redirect_external(&payment_url);
                }
                None => {
                    let message = "No payment URL returned".to_string();
                    toasts::error(&message);
                    CHECKOUT.write().reject(ticket, message);
                }
            },
            Err(err) => {
                let message = err.user_message();
                toasts::error(&message);
                CHECKOUT.write().reject(ticket, message);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_items(items: Vec<CartItem>) -> CartSnapshot {
        CartSnapshot {
            items,
            ..CartSnapshot::default()
        }
    }

    #[test]
    fn checkout_refuses_missing_or_empty_cart() {
        assert_eq!(build_checkout_request(None), Err("Your cart is empty"));
        let empty = snapshot_with_items(vec![]);
        assert_eq!(
            build_checkout_request(Some(&empty)),
            Err("Your cart is empty")
        );
    }

    #[test]
    fn checkout_request_carries_item_ids_and_coupon() {
        let mut cart = snapshot_with_items(vec![
            CartItem {
                id: "i1".into(),
                course_id: "c1".into(),
                title: "Rust 101".into(),
                thumbnail: None,
                price_cents: 1999,
            },
            CartItem {
                id: "i2".into(),
                course_id: "c2".into(),
                title: "Async Rust".into(),
                thumbnail: None,
                price_cents: 2999,
            },
        ]);
        cart.coupon_code = Some("WELCOME10".into());

        let request = build_checkout_request(Some(&cart)).unwrap();
        assert_eq!(request.item_ids, vec!["i1", "i2"]);
        assert_eq!(request.coupon_code.as_deref(), Some("WELCOME10"));
    }

    #[test]
    fn normalization_flattens_course_fields() {
        use learnhub_shared::{CartItemDto, CourseSummary};

        let raw = CartDto {
            items: vec![CartItemDto {
                id: "i1".into(),
                course: CourseSummary {
                    id: "c1".into(),
                    title: "Rust 101".into(),
                    subtitle: None,
                    thumbnail: Some("thumb.png".into()),
                    instructor_name: None,
                    price_cents: 1999,
                    rating: None,
                    category_id: None,
                },
                price_cents: 1999,
            }],
            subtotal_cents: 1999,
            discount_cents: 0,
            total_cents: 1999,
            coupon_code: None,
        };

        let snapshot = normalize_cart(raw);
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].course_id, "c1");
        assert_eq!(snapshot.items[0].title, "Rust 101");
        assert_eq!(snapshot.total_cents, 1999);
    }
}
