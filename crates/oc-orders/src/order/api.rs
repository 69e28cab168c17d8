//! Orders API
//!
//! REST endpoints for order management.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::order::entity::Order;
use crate::order::operations::{
    CompleteOrderUseCase, CreateOrderCommand, CreateOrderUseCase, DeleteOrderUseCase,
};
use crate::order::repository::OrderRepository;
use crate::shared::error::OrderError;
use crate::shared::identity::CallerIdentity;
use crate::txn::UnitOfWork;

/// Create order request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Human-readable name
    pub name: String,

    /// Monetary amount
    pub amount: f64,

    /// Units reserved by this order
    pub inventory: i64,
}

/// Order response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub inventory: i64,
    pub in_progress: bool,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            name: order.name,
            amount: order.amount,
            inventory: order.inventory,
            in_progress: order.in_progress,
        }
    }
}

/// Orders service state
pub struct OrdersState<U: UnitOfWork> {
    pub order_repo: Arc<OrderRepository>,
    pub create_use_case: Arc<CreateOrderUseCase<U>>,
    pub complete_use_case: Arc<CompleteOrderUseCase<U>>,
    pub delete_use_case: Arc<DeleteOrderUseCase>,
}

impl<U: UnitOfWork> Clone for OrdersState<U> {
    fn clone(&self) -> Self {
        Self {
            order_repo: self.order_repo.clone(),
            create_use_case: self.create_use_case.clone(),
            complete_use_case: self.complete_use_case.clone(),
            delete_use_case: self.delete_use_case.clone(),
        }
    }
}

/// Create a new order
#[utoipa::path(
    post,
    path = "",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_order<U: UnitOfWork>(
    State(state): State<OrdersState<U>>,
    identity: CallerIdentity,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), OrderError> {
    let command = CreateOrderCommand {
        name: req.name,
        amount: req.amount,
        inventory: req.inventory,
    };

    let order = state.create_use_case.execute(command, identity).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

/// List all orders
#[utoipa::path(
    get,
    path = "",
    tag = "orders",
    responses(
        (status = 200, description = "List of orders", body = Vec<OrderResponse>)
    )
)]
pub async fn list_orders<U: UnitOfWork>(
    State(state): State<OrdersState<U>>,
) -> Result<Json<Vec<OrderResponse>>, OrderError> {
    let orders = state.order_repo.find_all().await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// Get order by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "orders",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order<U: UnitOfWork>(
    State(state): State<OrdersState<U>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, OrderError> {
    let order = state
        .order_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| OrderError::not_found(&id))?;

    Ok(Json(order.into()))
}

/// Complete an order's business transaction
#[utoipa::path(
    put,
    path = "/{id}/complete",
    tag = "orders",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order completed", body = OrderResponse),
        (status = 404, description = "Order not found")
    )
)]
pub async fn complete_order<U: UnitOfWork>(
    State(state): State<OrdersState<U>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, OrderError> {
    let order = state.complete_use_case.execute(&id).await?;
    Ok(Json(order.into()))
}

/// Delete order
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "orders",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 204, description = "Order deleted")
    )
)]
pub async fn delete_order<U: UnitOfWork>(
    State(state): State<OrdersState<U>>,
    Path(id): Path<String>,
) -> Result<StatusCode, OrderError> {
    state.delete_use_case.execute(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create the orders router
pub fn orders_router<U: UnitOfWork + 'static>(state: OrdersState<U>) -> Router {
    Router::new()
        .route("/", post(create_order::<U>).get(list_orders::<U>))
        .route("/:id", get(get_order::<U>).delete(delete_order::<U>))
        .route("/:id/complete", put(complete_order::<U>))
        .with_state(state)
}
