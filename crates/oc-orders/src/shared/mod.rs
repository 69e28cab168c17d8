//! Shared Module
//!
//! Cross-cutting concerns and shared utilities.

pub mod debug_api;
pub mod error;
pub mod health_api;
pub mod identity;
pub mod tsid;

pub use error::{OrderError, Result};
pub use identity::CallerIdentity;
pub use tsid::TsidGenerator;
