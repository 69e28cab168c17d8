//! Order Service Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use utoipa::ToSchema;

use crate::txn::registrar::RegistrarError;

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Order not found: {id}")]
    NotFound { id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error(transparent)]
    Registrar(#[from] RegistrarError),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Broker error: {0}")]
    Broker(#[from] oc_broker::SendError),

    #[error("Commit failed: {message}")]
    Commit { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl OrderError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn commit(message: impl Into<String>) -> Self {
        Self::Commit { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, OrderError>;

/// Error response body
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            OrderError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            OrderError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            OrderError::Broker(_) => (StatusCode::BAD_GATEWAY, "BROKER_ERROR"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
