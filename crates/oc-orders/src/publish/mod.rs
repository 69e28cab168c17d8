//! Outcome Publisher
//!
//! Translates a finalized `(event, outcome)` pair into a send against the
//! broker channel. Publish failures are logged and swallowed at this
//! boundary: by the time publish runs the database outcome is already
//! final, so failing loudly could only destabilize the finalize path.
//! Delivery is at-least-once on success and best-effort on failure; there
//! is no outbox or retry queue behind this.

use std::sync::Arc;

use tracing::{error, info};

use oc_broker::BrokerPublisher;
use oc_common::OutboundEnvelope;

use crate::order::operations::events::OrderEvent;
use crate::txn::TxnOutcome;

/// Topic receiving committed order events.
pub const TOPIC_ORDER_PLACED: &str = "order_placed";
/// Topic receiving rolled-back and deleted order events.
pub const TOPIC_ORDER_FAILED: &str = "order_failed";

pub struct OutcomePublisher {
    channel: Arc<dyn BrokerPublisher>,
}

impl OutcomePublisher {
    pub fn new(channel: Arc<dyn BrokerPublisher>) -> Self {
        Self { channel }
    }

    fn topic_for(outcome: TxnOutcome) -> &'static str {
        match outcome {
            TxnOutcome::Committed => TOPIC_ORDER_PLACED,
            TxnOutcome::RolledBack => TOPIC_ORDER_FAILED,
        }
    }

    /// Announce a finalized event. Never fails past this boundary.
    pub async fn on_outcome(&self, event: &OrderEvent, outcome: TxnOutcome) {
        let topic = Self::topic_for(outcome);

        let body = event
            .payload_json()
            .and_then(|payload| OutboundEnvelope::new(payload, event.auth_token()).to_json());
        let body = match body {
            Ok(body) => body,
            Err(e) => {
                error!(
                    topic,
                    order_id = %event.order_id(),
                    error = %e,
                    "Failed to serialize order event, dropping"
                );
                return;
            }
        };

        info!(topic, order_id = %event.order_id(), "Producing order event");
        if let Err(e) = self.channel.send(topic, body).await {
            error!(
                topic,
                order_id = %event.order_id(),
                error = %e,
                "Failed to publish order event"
            );
        }
    }

    /// Direct announcement for deletions: the raw order id goes to the
    /// failure topic immediately, with no envelope and no outcome gate.
    pub async fn announce_deleted(&self, order_id: &str) {
        info!(topic = TOPIC_ORDER_FAILED, order_id, "Producing delete announcement");
        if let Err(e) = self.channel.send(TOPIC_ORDER_FAILED, order_id.to_string()).await {
            error!(
                topic = TOPIC_ORDER_FAILED,
                order_id,
                error = %e,
                "Failed to publish delete announcement"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oc_broker::memory::InMemoryBroker;

    use crate::order::entity::Order;

    fn publisher() -> (Arc<InMemoryBroker>, OutcomePublisher) {
        let broker = Arc::new(InMemoryBroker::new("test"));
        (broker.clone(), OutcomePublisher::new(broker))
    }

    #[tokio::test]
    async fn test_committed_outcome_goes_to_order_placed() {
        let (broker, publisher) = publisher();
        let order = Order::new("Coffee", 4.50, 2);
        let event = OrderEvent::new(&order, Some("abc123"));

        publisher.on_outcome(&event, TxnOutcome::Committed).await;

        let sent = broker.sent_to(TOPIC_ORDER_PLACED);
        assert_eq!(sent.len(), 1);
        assert!(broker.sent_to(TOPIC_ORDER_FAILED).is_empty());

        let envelope: serde_json::Value = serde_json::from_str(&sent[0]).unwrap();
        assert_eq!(envelope["authToken"], "Bearer abc123");
        // data carries the order as a nested JSON string
        let data: serde_json::Value =
            serde_json::from_str(envelope["data"].as_str().unwrap()).unwrap();
        assert_eq!(data["name"], "Coffee");
    }

    #[tokio::test]
    async fn test_rolled_back_outcome_goes_to_order_failed() {
        let (broker, publisher) = publisher();
        let order = Order::new("Coffee", 4.50, 2);
        let event = OrderEvent::new(&order, None);

        publisher.on_outcome(&event, TxnOutcome::RolledBack).await;

        assert!(broker.sent_to(TOPIC_ORDER_PLACED).is_empty());
        let sent = broker.sent_to(TOPIC_ORDER_FAILED);
        assert_eq!(sent.len(), 1);

        let envelope: serde_json::Value = serde_json::from_str(&sent[0]).unwrap();
        assert!(envelope.get("authToken").is_none());
    }

    #[tokio::test]
    async fn test_delete_announcement_is_raw_id_on_failure_topic() {
        let (broker, publisher) = publisher();

        publisher.announce_deleted("42").await;

        assert_eq!(broker.sent_to(TOPIC_ORDER_FAILED), vec!["42"]);
        assert!(broker.sent_to(TOPIC_ORDER_PLACED).is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_is_swallowed() {
        let (broker, publisher) = publisher();
        broker.set_failing(true);

        let order = Order::new("Coffee", 4.50, 2);
        let event = OrderEvent::new(&order, None);

        // Neither call returns an error type; reaching the end is the assertion.
        publisher.on_outcome(&event, TxnOutcome::Committed).await;
        publisher.announce_deleted("42").await;

        assert!(broker.sent().is_empty());
    }
}
