//! Complete Order Use Case

use std::sync::Arc;

use crate::order::entity::Order;
use crate::order::repository::OrderRepository;
use crate::shared::error::{OrderError, Result};
use crate::txn::UnitOfWork;

/// Use case for completing an order's business transaction.
///
/// Clears the `in_progress` flag. No event is announced for completion;
/// only the save path goes through the outcome bridge.
pub struct CompleteOrderUseCase<U: UnitOfWork> {
    order_repo: Arc<OrderRepository>,
    unit_of_work: Arc<U>,
}

impl<U: UnitOfWork> CompleteOrderUseCase<U> {
    pub fn new(order_repo: Arc<OrderRepository>, unit_of_work: Arc<U>) -> Self {
        Self {
            order_repo,
            unit_of_work,
        }
    }

    pub async fn execute(&self, id: &str) -> Result<Order> {
        let mut order = self
            .order_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| OrderError::not_found(id))?;

        order.complete();
        self.unit_of_work.commit_update(order).await
    }
}
