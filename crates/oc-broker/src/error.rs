use thiserror::Error;

#[derive(Error, Debug)]
pub enum SendError {
    #[error("Broker connection error: {0}")]
    Connection(String),

    #[error("Broker channel error: {0}")]
    Channel(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not connected to broker")]
    NotConnected,

    #[error("Configuration error: {0}")]
    Config(String),
}
