//! Purchase history slice.

use dioxus::prelude::*;
use learnhub_shared::OrderDto;

use crate::auth_session::AuthContext;
use crate::stores::slice::Slice;
use crate::stores::toasts;

pub static PURCHASES: GlobalSignal<Slice<Vec<OrderDto>>> = Signal::global(Slice::new);

/// Most recent order first.
pub fn normalize_orders(mut raw: Vec<OrderDto>) -> Vec<OrderDto> {
    raw.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    raw
}

pub fn fetch_purchases(auth: &AuthContext) {
    let ticket = PURCHASES.write().begin();
    let client = auth.client();

    spawn(async move {
        match client.get_json::<Vec<OrderDto>>("/orders/history").await {
            Ok(raw) => {
                PURCHASES.write().fulfill(ticket, normalize_orders(raw));
            }
            Err(err) => {
                let message = err.user_message();
                toasts::error(&message);
                PURCHASES.write().reject(ticket, message);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use learnhub_shared::OrderStatus;

    fn order(id: &str, days_ago: i64) -> OrderDto {
        OrderDto {
            id: id.to_string(),
            total_cents: 1000,
            status: OrderStatus::Paid,
            items: vec![],
            created_at: Utc::now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn orders_sort_newest_first() {
        let normalized = normalize_orders(vec![order("a", 5), order("b", 1), order("c", 9)]);
        let ids: Vec<&str> = normalized.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
