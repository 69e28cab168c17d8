use async_trait::async_trait;

pub mod error;
pub mod memory;

#[cfg(feature = "amqp")]
pub mod amqp;

pub use error::SendError;

pub type Result<T> = std::result::Result<T, SendError>;

/// Trait for publishing messages to a broker topic.
///
/// Implementations are stateless adapters over a shared connection and must
/// be safe for concurrent invocation. No retry or backpressure handling is
/// done at this level; failures surface as [`SendError`] and the caller
/// decides what a failed publish means.
#[async_trait]
pub trait BrokerPublisher: Send + Sync {
    /// Identifier for logs and diagnostics.
    fn identifier(&self) -> &str;

    /// Publish a single payload to a topic.
    async fn send(&self, topic: &str, payload: String) -> Result<()>;
}
