//! Ordercast Orders
//!
//! Order domain for the ordercast platform:
//! - Order aggregate (entity, repository, REST API, use case operations)
//! - Transactional outcome bridge: announcement of order events is deferred
//!   until the owning database transaction has definitively committed or
//!   rolled back
//! - Outcome publisher mapping transaction outcomes onto broker topics
//!
//! ## Module Organization
//!
//! - `order` - the aggregate: entity, repository, api, operations
//! - `txn` - unit of work and the outcome registrar
//! - `publish` - envelope construction and broker announcement
//! - `shared` - errors, id generation, caller identity, service APIs

pub mod order;
pub mod publish;
pub mod shared;
pub mod txn;

// Re-export common types from shared
pub use shared::error::{OrderError, Result};
pub use shared::identity::CallerIdentity;
pub use shared::tsid::TsidGenerator;

// Re-export main domain types for convenience
pub use order::entity::Order;
pub use order::operations::events::OrderEvent;
pub use order::repository::OrderRepository;

pub use publish::{OutcomePublisher, TOPIC_ORDER_FAILED, TOPIC_ORDER_PLACED};
pub use txn::{MongoUnitOfWork, OutcomeRegistrar, RegistrarError, TxnOutcome, UnitOfWork};
