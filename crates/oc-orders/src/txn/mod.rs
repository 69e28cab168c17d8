//! Transactional Outcome Bridge
//!
//! Decouples "an order event happened" from "the event is safe to
//! announce". Events produced inside a unit of work are registered with
//! the [`registrar::OutcomeRegistrar`] and delivered only once the owning
//! transaction's final outcome is known.

pub mod registrar;
pub mod unit_of_work;

pub use registrar::{OutcomeRegistrar, RegistrarError};
pub use unit_of_work::{MongoUnitOfWork, UnitOfWork};

/// Final disposition of a unit of work.
///
/// Determined exactly once per transaction by the unit-of-work host, never
/// inferred speculatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnOutcome {
    Committed,
    RolledBack,
}
