//! Order Domain Event

use serde::Serialize;

use crate::order::entity::Order;

/// Point-in-time view of an order, as announced to the broker.
///
/// Serializes with a plain `id` key; the entity's `_id` is a storage
/// detail that never goes on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub inventory: i64,
    pub in_progress: bool,
}

impl From<&Order> for OrderSnapshot {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            name: order.name.clone(),
            amount: order.amount,
            inventory: order.inventory,
            in_progress: order.in_progress,
        }
    }
}

/// Immutable record of an order write, held back until the owning
/// transaction's outcome is known.
///
/// The caller's bearer token is captured here, at event-creation time.
/// Delivery may run on a different task than the original request, so
/// resolving identity any later would read the wrong context.
#[derive(Debug, Clone)]
pub struct OrderEvent {
    snapshot: OrderSnapshot,
    auth_token: Option<String>,
}

impl OrderEvent {
    pub fn new(order: &Order, auth_token: Option<&str>) -> Self {
        Self {
            snapshot: OrderSnapshot::from(order),
            auth_token: auth_token.map(String::from),
        }
    }

    pub fn order_id(&self) -> &str {
        &self.snapshot.id
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Canonical string form of the snapshot. The envelope nests this as
    /// its `data` field, so the wire format is JSON inside JSON.
    pub fn payload_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_uses_camel_case_and_plain_id() {
        let order = Order::new("Coffee", 4.50, 2);
        let event = OrderEvent::new(&order, None);

        let value: serde_json::Value =
            serde_json::from_str(&event.payload_json().unwrap()).unwrap();
        assert_eq!(value["id"], order.id.as_str());
        assert_eq!(value["name"], "Coffee");
        assert_eq!(value["inProgress"], true);
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn test_token_is_captured_at_creation() {
        let order = Order::new("Coffee", 4.50, 2);
        let event = OrderEvent::new(&order, Some("abc123"));
        assert_eq!(event.auth_token(), Some("abc123"));
        assert_eq!(event.order_id(), order.id.as_str());
    }
}
