//! Delete Order Use Case

use std::sync::Arc;

use crate::order::repository::OrderRepository;
use crate::publish::OutcomePublisher;
use crate::shared::error::Result;

/// Use case for deleting an order.
///
/// Deletion announces the raw order id on the failure topic immediately
/// after the repository call, bypassing the transactional-outcome gate
/// entirely. This asymmetry with the save path is deliberate and matches
/// the platform's established wire behavior; consumers key on the failure
/// topic for both rolled-back and deleted orders.
pub struct DeleteOrderUseCase {
    order_repo: Arc<OrderRepository>,
    publisher: Arc<OutcomePublisher>,
}

impl DeleteOrderUseCase {
    pub fn new(order_repo: Arc<OrderRepository>, publisher: Arc<OutcomePublisher>) -> Self {
        Self {
            order_repo,
            publisher,
        }
    }

    pub async fn execute(&self, id: &str) -> Result<()> {
        // Announced whether or not the id matched a stored order.
        self.order_repo.delete(id).await?;
        self.publisher.announce_deleted(id).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use oc_broker::memory::InMemoryBroker;

    use crate::publish::{TOPIC_ORDER_FAILED, TOPIC_ORDER_PLACED};

    #[tokio::test]
    async fn test_delete_announcement_payload_is_the_raw_id() {
        let broker = Arc::new(InMemoryBroker::new("test"));
        let publisher = OutcomePublisher::new(broker.clone());

        publisher.announce_deleted("42").await;

        assert_eq!(broker.sent_to(TOPIC_ORDER_FAILED), vec!["42"]);
        assert!(broker.sent_to(TOPIC_ORDER_PLACED).is_empty());
    }
}
