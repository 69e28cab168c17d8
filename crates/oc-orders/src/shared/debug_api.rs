//! Debug Broker API
//!
//! Publishes an arbitrary message through the broker channel, wrapped in
//! the same envelope order announcements use. Development aid; unlike the
//! outcome path, errors here are surfaced to the caller because nothing is
//! finalizing a transaction.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use oc_broker::BrokerPublisher;
use oc_common::OutboundEnvelope;

use crate::shared::error::OrderError;
use crate::shared::identity::CallerIdentity;

/// Debug broker service state
#[derive(Clone)]
pub struct DebugBrokerState {
    pub channel: Arc<dyn BrokerPublisher>,
}

/// Publish request
#[derive(Debug, Deserialize, ToSchema)]
pub struct PublishRequest {
    /// Target topic
    pub topic: String,
    /// Message body, nested into the envelope's `data` field
    pub message: String,
}

/// Publish a message to an arbitrary topic
#[utoipa::path(
    post,
    path = "/publish",
    tag = "broker",
    request_body = PublishRequest,
    responses(
        (status = 204, description = "Message published"),
        (status = 502, description = "Broker rejected the message", body = crate::shared::error::ErrorResponse)
    )
)]
pub async fn publish_message(
    State(state): State<DebugBrokerState>,
    identity: CallerIdentity,
    Json(req): Json<PublishRequest>,
) -> Result<StatusCode, OrderError> {
    let envelope = OutboundEnvelope::new(req.message, identity.token());
    state.channel.send(&req.topic, envelope.to_json()?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create the debug broker router
pub fn debug_broker_router(state: DebugBrokerState) -> Router {
    Router::new()
        .route("/publish", post(publish_message))
        .with_state(state)
}
