//! Outcome Registrar
//!
//! Per-transaction accumulator for order events. The unit-of-work host
//! opens an accumulator when its transaction starts, events are registered
//! against it while the transaction is active, and `finalize` delivers
//! them to the publisher exactly once, in registration order, with the
//! transaction's final outcome. Accumulators are keyed by transaction id,
//! so concurrent units of work never see each other's events.

use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;
use tracing::{debug, warn};

use super::TxnOutcome;
use crate::order::operations::events::OrderEvent;
use crate::publish::OutcomePublisher;

#[derive(Error, Debug)]
pub enum RegistrarError {
    /// `register` was called without an open transaction. This is a
    /// programmer error: swallowing it would silently lose the order
    /// announcement for good, so the caller must see it.
    #[error("No active transaction: {txn_id}")]
    NoActiveTransaction { txn_id: String },
}

pub struct OutcomeRegistrar {
    publisher: Arc<OutcomePublisher>,
    pending: DashMap<String, Vec<OrderEvent>>,
}

impl OutcomeRegistrar {
    pub fn new(publisher: Arc<OutcomePublisher>) -> Self {
        Self {
            publisher,
            pending: DashMap::new(),
        }
    }

    /// Open an accumulator for `txn_id`. Called by the unit-of-work host
    /// when its transaction starts.
    pub fn begin(&self, txn_id: &str) {
        self.pending.insert(txn_id.to_string(), Vec::new());
    }

    /// Bind `event` to the open transaction `txn_id`. No external effect
    /// until the transaction's outcome is known.
    pub fn register(&self, txn_id: &str, event: OrderEvent) -> Result<(), RegistrarError> {
        match self.pending.get_mut(txn_id) {
            Some(mut events) => {
                events.push(event);
                Ok(())
            }
            None => Err(RegistrarError::NoActiveTransaction {
                txn_id: txn_id.to_string(),
            }),
        }
    }

    /// Deliver every event registered under `txn_id` with the
    /// transaction's final outcome, in registration order, then discard
    /// the accumulator.
    ///
    /// The accumulator is removed before delivery, so a second finalize
    /// for the same id finds nothing, and a register racing a finalize is
    /// rejected with `NoActiveTransaction` instead of being queued
    /// forever.
    pub async fn finalize(&self, txn_id: &str, outcome: TxnOutcome) {
        let Some((_, events)) = self.pending.remove(txn_id) else {
            warn!(txn_id, "Finalize for unknown transaction, nothing to deliver");
            return;
        };

        debug!(txn_id, ?outcome, count = events.len(), "Delivering registered events");
        for event in &events {
            self.publisher.on_outcome(event, outcome).await;
        }
    }

    /// Number of transactions with an open accumulator. Diagnostics only.
    pub fn open_transactions(&self) -> usize {
        self.pending.len()
    }
}
