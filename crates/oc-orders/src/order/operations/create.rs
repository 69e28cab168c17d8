//! Create Order Use Case

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::order::entity::Order;
use crate::order::operations::events::OrderEvent;
use crate::shared::error::{OrderError, Result};
use crate::shared::identity::CallerIdentity;
use crate::txn::UnitOfWork;

/// Command for creating a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderCommand {
    pub name: String,
    pub amount: f64,
    pub inventory: i64,
}

/// Use case for creating a new order.
///
/// The order is persisted and its event announced through the unit of
/// work, so the announcement lands on `order_placed` only if the
/// transaction commits and on `order_failed` if it rolls back.
pub struct CreateOrderUseCase<U: UnitOfWork> {
    unit_of_work: Arc<U>,
}

impl<U: UnitOfWork> CreateOrderUseCase<U> {
    pub fn new(unit_of_work: Arc<U>) -> Self {
        Self { unit_of_work }
    }

    pub async fn execute(
        &self,
        command: CreateOrderCommand,
        identity: CallerIdentity,
    ) -> Result<Order> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(OrderError::validation("Order name is required"));
        }
        if command.amount < 0.0 {
            return Err(OrderError::validation("Order amount must not be negative"));
        }
        if command.inventory < 0 {
            return Err(OrderError::validation("Order inventory must not be negative"));
        }

        // New orders start with their business transaction open.
        let order = Order::new(name, command.amount, command.inventory);

        // Identity is captured now; delivery may run on another task.
        let event = OrderEvent::new(&order, identity.token());

        self.unit_of_work.commit_save(order, event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use oc_broker::memory::InMemoryBroker;

    use crate::publish::{OutcomePublisher, TOPIC_ORDER_PLACED};
    use crate::txn::unit_of_work::InMemoryUnitOfWork;
    use crate::txn::OutcomeRegistrar;

    fn use_case() -> (Arc<InMemoryBroker>, CreateOrderUseCase<InMemoryUnitOfWork>) {
        let broker = Arc::new(InMemoryBroker::new("test"));
        let publisher = Arc::new(OutcomePublisher::new(broker.clone()));
        let registrar = Arc::new(OutcomeRegistrar::new(publisher));
        let uow = Arc::new(InMemoryUnitOfWork::new(registrar));
        (broker, CreateOrderUseCase::new(uow))
    }

    #[test]
    fn test_command_serialization() {
        let command = CreateOrderCommand {
            name: "Coffee".to_string(),
            amount: 4.50,
            inventory: 2,
        };

        let json = serde_json::to_string(&command).unwrap();
        assert!(json.contains("Coffee"));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let (broker, use_case) = use_case();

        let err = use_case
            .execute(
                CreateOrderCommand {
                    name: "  ".to_string(),
                    amount: 4.50,
                    inventory: 2,
                },
                CallerIdentity::anonymous(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::Validation { .. }));
        assert!(broker.sent().is_empty());
    }

    #[tokio::test]
    async fn test_create_announces_with_caller_token() {
        let (broker, use_case) = use_case();

        let order = use_case
            .execute(
                CreateOrderCommand {
                    name: "Coffee".to_string(),
                    amount: 4.50,
                    inventory: 2,
                },
                CallerIdentity::with_token("abc123"),
            )
            .await
            .unwrap();

        assert!(order.in_progress);
        let sent = broker.sent_to(TOPIC_ORDER_PLACED);
        assert_eq!(sent.len(), 1);
        let envelope: serde_json::Value = serde_json::from_str(&sent[0]).unwrap();
        assert_eq!(envelope["authToken"], "Bearer abc123");
    }
}
