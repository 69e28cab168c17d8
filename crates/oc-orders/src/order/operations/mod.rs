//! Order Use Case Operations

pub mod complete;
pub mod create;
pub mod delete;
pub mod events;

pub use complete::CompleteOrderUseCase;
pub use create::{CreateOrderCommand, CreateOrderUseCase};
pub use delete::DeleteOrderUseCase;
pub use events::{OrderEvent, OrderSnapshot};
