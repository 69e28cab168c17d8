//! Unit of Work
//!
//! Host for the database transaction that owns each order write. The
//! MongoDB implementation persists the aggregate and registers the order
//! event inside one multi-document transaction, then finalizes the
//! registrar with the real outcome: `Committed` after a successful commit,
//! `RolledBack` on every abort path. Broker I/O therefore runs strictly
//! after the database outcome is final and can never fail the transaction
//! itself.
//!
//! # Requirements
//! - MongoDB 4.0+ (multi-document transactions)
//! - Replica set deployment (transactions require a replica set)

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{bson::doc, Client, Database};
use tracing::debug;

use super::registrar::OutcomeRegistrar;
use super::TxnOutcome;
use crate::order::entity::Order;
use crate::order::operations::events::OrderEvent;
use crate::shared::error::OrderError;
use crate::shared::tsid::TsidGenerator;

#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Persist `order` and announce `event` once the transaction outcome
    /// is known. Returns the persisted order on commit.
    async fn commit_save(&self, order: Order, event: OrderEvent) -> Result<Order, OrderError>;

    /// Persist an update with no announcement attached.
    async fn commit_update(&self, order: Order) -> Result<Order, OrderError>;
}

#[derive(Clone)]
pub struct MongoUnitOfWork {
    client: Client,
    database: Database,
    registrar: Arc<OutcomeRegistrar>,
}

impl MongoUnitOfWork {
    pub fn new(client: Client, database: Database, registrar: Arc<OutcomeRegistrar>) -> Self {
        Self {
            client,
            database,
            registrar,
        }
    }

    async fn persist_in_txn(
        &self,
        txn_id: &str,
        order: &Order,
        event: Option<OrderEvent>,
    ) -> Result<(), OrderError> {
        let mut session = self
            .client
            .start_session()
            .await
            .map_err(|e| OrderError::commit(format!("Failed to start session: {}", e)))?;

        session
            .start_transaction()
            .await
            .map_err(|e| OrderError::commit(format!("Failed to start transaction: {}", e)))?;

        let collection = self.database.collection::<Order>("orders");
        let upsert = collection
            .replace_one(doc! { "_id": &order.id }, order)
            .upsert(true)
            .session(&mut session)
            .await;

        if let Err(e) = upsert {
            let _ = session.abort_transaction().await;
            return Err(OrderError::commit(format!("Failed to persist order: {}", e)));
        }

        // Registration happens while the transaction is still active; no
        // announcement leaves here.
        if let Some(event) = event {
            if let Err(e) = self.registrar.register(txn_id, event) {
                let _ = session.abort_transaction().await;
                return Err(e.into());
            }
        }

        session
            .commit_transaction()
            .await
            .map_err(|e| OrderError::commit(format!("Failed to commit transaction: {}", e)))
    }
}

#[async_trait]
impl UnitOfWork for MongoUnitOfWork {
    async fn commit_save(&self, order: Order, event: OrderEvent) -> Result<Order, OrderError> {
        let txn_id = TsidGenerator::generate();
        self.registrar.begin(&txn_id);

        match self.persist_in_txn(&txn_id, &order, Some(event)).await {
            Ok(()) => {
                self.registrar.finalize(&txn_id, TxnOutcome::Committed).await;
                debug!(txn_id, order_id = %order.id, "Order transaction committed");
                Ok(order)
            }
            Err(e) => {
                // Events registered before the failure are announced with
                // the rolled-back outcome; events never registered are not
                // announced at all.
                self.registrar.finalize(&txn_id, TxnOutcome::RolledBack).await;
                Err(e)
            }
        }
    }

    async fn commit_update(&self, order: Order) -> Result<Order, OrderError> {
        let txn_id = TsidGenerator::generate();
        self.registrar.begin(&txn_id);

        match self.persist_in_txn(&txn_id, &order, None).await {
            Ok(()) => {
                self.registrar.finalize(&txn_id, TxnOutcome::Committed).await;
                Ok(order)
            }
            Err(e) => {
                self.registrar.finalize(&txn_id, TxnOutcome::RolledBack).await;
                Err(e)
            }
        }
    }
}

/// In-memory UnitOfWork for testing.
///
/// Follows the same begin/register/finalize choreography as the MongoDB
/// implementation, with a toggle that makes the commit step fail so
/// rollback paths can be driven without a database.
#[cfg(test)]
pub struct InMemoryUnitOfWork {
    registrar: Arc<OutcomeRegistrar>,
    orders: std::sync::Mutex<std::collections::HashMap<String, Order>>,
    fail_commits: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl InMemoryUnitOfWork {
    pub fn new(registrar: Arc<OutcomeRegistrar>) -> Self {
        Self {
            registrar,
            orders: std::sync::Mutex::new(std::collections::HashMap::new()),
            fail_commits: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_commits
            .store(failing, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn stored(&self, id: &str) -> Option<Order> {
        self.orders.lock().unwrap().get(id).cloned()
    }

    async fn finish(&self, txn_id: &str, order: Order) -> Result<Order, OrderError> {
        if self.fail_commits.load(std::sync::atomic::Ordering::SeqCst) {
            self.orders.lock().unwrap().remove(&order.id);
            self.registrar.finalize(txn_id, TxnOutcome::RolledBack).await;
            return Err(OrderError::commit("simulated commit failure"));
        }

        self.registrar.finalize(txn_id, TxnOutcome::Committed).await;
        Ok(order)
    }
}

#[cfg(test)]
#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn commit_save(&self, order: Order, event: OrderEvent) -> Result<Order, OrderError> {
        let txn_id = TsidGenerator::generate();
        self.registrar.begin(&txn_id);

        self.orders
            .lock()
            .unwrap()
            .insert(order.id.clone(), order.clone());

        if let Err(e) = self.registrar.register(&txn_id, event) {
            self.registrar.finalize(&txn_id, TxnOutcome::RolledBack).await;
            return Err(e.into());
        }

        self.finish(&txn_id, order).await
    }

    async fn commit_update(&self, order: Order) -> Result<Order, OrderError> {
        let txn_id = TsidGenerator::generate();
        self.registrar.begin(&txn_id);

        self.orders
            .lock()
            .unwrap()
            .insert(order.id.clone(), order.clone());

        self.finish(&txn_id, order).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use oc_broker::memory::InMemoryBroker;

    use crate::publish::{OutcomePublisher, TOPIC_ORDER_FAILED, TOPIC_ORDER_PLACED};

    fn unit_of_work() -> (Arc<InMemoryBroker>, InMemoryUnitOfWork) {
        let broker = Arc::new(InMemoryBroker::new("test"));
        let publisher = Arc::new(OutcomePublisher::new(broker.clone()));
        let registrar = Arc::new(OutcomeRegistrar::new(publisher));
        (broker, InMemoryUnitOfWork::new(registrar))
    }

    #[tokio::test]
    async fn test_committed_save_announces_on_order_placed() {
        let (broker, uow) = unit_of_work();
        let order = Order::new("Coffee", 4.50, 2);
        let event = OrderEvent::new(&order, Some("abc123"));
        let id = order.id.clone();

        uow.commit_save(order, event).await.unwrap();

        assert!(uow.stored(&id).is_some());
        let sent = broker.sent_to(TOPIC_ORDER_PLACED);
        assert_eq!(sent.len(), 1);
        assert!(broker.sent_to(TOPIC_ORDER_FAILED).is_empty());

        let envelope: serde_json::Value = serde_json::from_str(&sent[0]).unwrap();
        assert_eq!(envelope["authToken"], "Bearer abc123");
        let data: serde_json::Value =
            serde_json::from_str(envelope["data"].as_str().unwrap()).unwrap();
        assert_eq!(data["id"], id.as_str());
    }

    #[tokio::test]
    async fn test_rolled_back_save_announces_on_order_failed() {
        let (broker, uow) = unit_of_work();
        uow.set_failing(true);

        let order = Order::new("Coffee", 4.50, 2);
        let event = OrderEvent::new(&order, None);
        let id = order.id.clone();

        let err = uow.commit_save(order, event).await.unwrap_err();
        assert!(matches!(err, OrderError::Commit { .. }));

        assert!(uow.stored(&id).is_none());
        assert!(broker.sent_to(TOPIC_ORDER_PLACED).is_empty());
        assert_eq!(broker.sent_to(TOPIC_ORDER_FAILED).len(), 1);
    }

    #[tokio::test]
    async fn test_broker_outage_does_not_fail_the_commit() {
        let (broker, uow) = unit_of_work();
        broker.set_failing(true);

        let order = Order::new("Coffee", 4.50, 2);
        let event = OrderEvent::new(&order, None);
        let id = order.id.clone();

        // The caller observes only the persistence result.
        uow.commit_save(order, event).await.unwrap();
        assert!(uow.stored(&id).is_some());
        assert!(broker.sent().is_empty());
    }

    #[tokio::test]
    async fn test_update_announces_nothing() {
        let (broker, uow) = unit_of_work();
        let mut order = Order::new("Coffee", 4.50, 2);
        order.complete();

        uow.commit_update(order).await.unwrap();

        assert!(broker.sent().is_empty());
    }
}
