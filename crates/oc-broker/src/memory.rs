//! In-Memory Broker
//!
//! Records every publish instead of leaving the process. Used in dev mode
//! when no broker is available, and as the capture point for tests that
//! assert on what the service announced.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use crate::{BrokerPublisher, Result, SendError};

/// A message captured by the in-memory broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub topic: String,
    pub payload: String,
}

pub struct InMemoryBroker {
    identifier: String,
    sent: Mutex<Vec<SentMessage>>,
    fail_sends: AtomicBool,
}

impl InMemoryBroker {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            sent: Mutex::new(Vec::new()),
            fail_sends: AtomicBool::new(false),
        }
    }

    /// Snapshot of everything sent so far, in send order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().clone()
    }

    /// Payloads sent to one topic, in send order.
    pub fn sent_to(&self, topic: &str) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter(|m| m.topic == topic)
            .map(|m| m.payload.clone())
            .collect()
    }

    /// When set, every `send` fails with a connection error. Simulates a
    /// broker outage.
    pub fn set_failing(&self, failing: bool) {
        self.fail_sends.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl BrokerPublisher for InMemoryBroker {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    async fn send(&self, topic: &str, payload: String) -> Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(SendError::Connection("simulated broker outage".to_string()));
        }

        debug!(broker = %self.identifier, topic, "captured message");
        self.sent.lock().push(SentMessage {
            topic: topic.to_string(),
            payload,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_sends_in_order() {
        let broker = InMemoryBroker::new("test");
        broker.send("a", "1".to_string()).await.unwrap();
        broker.send("b", "2".to_string()).await.unwrap();
        broker.send("a", "3".to_string()).await.unwrap();

        assert_eq!(broker.sent().len(), 3);
        assert_eq!(broker.sent_to("a"), vec!["1", "3"]);
        assert_eq!(broker.sent_to("b"), vec!["2"]);
    }

    #[tokio::test]
    async fn test_failing_broker_returns_send_error() {
        let broker = InMemoryBroker::new("test");
        broker.set_failing(true);

        let err = broker.send("a", "1".to_string()).await.unwrap_err();
        assert!(matches!(err, SendError::Connection(_)));
        assert!(broker.sent().is_empty());

        broker.set_failing(false);
        broker.send("a", "1".to_string()).await.unwrap();
        assert_eq!(broker.sent_to("a"), vec!["1"]);
    }
}
