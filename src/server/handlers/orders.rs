//! HTTP handlers for orders and the order-listing search

use crate::core::error::{EntityError, RestroError, RestroResult, ValidationError};
use crate::core::query::{PaginationMeta, PaginationParams};
use crate::core::validation::{OptionalJson, ValidatedJson};
use crate::entities::{
    CreateOrderRequest, Order, OrderStatus, PaymentMethodRequest, StatusUpdateRequest,
    UpdateOrderRequest,
};
use crate::search::parse_search;
use crate::server::host::ServerHost;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

const ORDER: &str = "Order";

/// Body of `POST /orders-listing`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub search: Option<String>,
}

fn parse_order_id(raw: &str) -> Result<Uuid, RestroError> {
    Uuid::parse_str(raw).map_err(|_| {
        ValidationError::InvalidUuid {
            value: raw.to_string(),
        }
        .into()
    })
}

async fn load_order(host: &ServerHost, order_id: &Uuid) -> RestroResult<Order> {
    host.orders
        .get(order_id)
        .await?
        .ok_or_else(|| EntityError::not_found(ORDER, order_id).into())
}

async fn store_order(host: &ServerHost, order: Order) -> RestroResult<Order> {
    let order_id = order.order_id;
    host.orders
        .update(order)
        .await?
        .ok_or_else(|| EntityError::not_found(ORDER, order_id).into())
}

/// `POST /orders`
///
/// The display ID is drawn before the table check, so a rejected order still
/// consumes a counter value.
pub async fn create_order(
    State(host): State<Arc<ServerHost>>,
    ValidatedJson(request): ValidatedJson<CreateOrderRequest>,
) -> RestroResult<impl IntoResponse> {
    if request.requires_table() && request.table_number.is_none() {
        return Err(EntityError::rule(
            ORDER,
            "Table number is required unless it's a pickup order.",
        )
        .into());
    }

    let display_id = host.sequencer.next_display_id().await?;

    if let Some(table_number) = request.table_number
        && host.orders.find_active_for_table(table_number).await?.is_some()
    {
        return Err(EntityError::rule(
            ORDER,
            "An active order already exists for this table. Please update the existing order!",
        )
        .into());
    }

    let order = host.orders.create(Order::new(display_id, request)).await?;
    tracing::info!(
        order_id = %order.order_id,
        display_id = %order.display_id,
        "order created"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Order created successfully",
            "order": order,
        })),
    ))
}

/// `GET /orders`
pub async fn list_orders(
    State(host): State<Arc<ServerHost>>,
    Query(params): Query<PaginationParams>,
) -> RestroResult<impl IntoResponse> {
    let page = host.page(&params);
    let result = host.orders.list(page).await?;

    if result.orders.is_empty() {
        return Err(EntityError::none_found("orders").into());
    }

    Ok(Json(json!({
        "orders": result.orders,
        "pagination": PaginationMeta::new(page, result.total_count),
    })))
}

/// `POST /orders-listing`
///
/// An empty result is a valid page with `totalCount: 0`, never a 404. A
/// request without a body searches for everything.
pub async fn search_orders(
    State(host): State<Arc<ServerHost>>,
    Query(params): Query<PaginationParams>,
    OptionalJson(body): OptionalJson<SearchRequest>,
) -> RestroResult<impl IntoResponse> {
    let predicate = parse_search(body.search.as_deref());
    let page = host.page(&params);
    let result = host.orders.search(&predicate, page).await?;

    Ok(Json(json!({
        "orders": result.orders,
        "pagination": PaginationMeta::new(page, result.total_count),
        "totalPrice": result.total_price,
    })))
}

/// `GET /orders/{orderId}`
pub async fn get_order(
    State(host): State<Arc<ServerHost>>,
    Path(order_id): Path<String>,
) -> RestroResult<impl IntoResponse> {
    let order_id = parse_order_id(&order_id)?;
    Ok(Json(load_order(&host, &order_id).await?))
}

/// `PUT /orders/{orderId}`
pub async fn update_order(
    State(host): State<Arc<ServerHost>>,
    Path(order_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateOrderRequest>,
) -> RestroResult<impl IntoResponse> {
    if request.order_items.is_empty() {
        return Err(EntityError::rule(
            ORDER,
            "Please select at least one item to update the order.",
        )
        .into());
    }
    if request.requires_table() && request.table_number.is_none() {
        return Err(
            EntityError::rule(ORDER, "Table number is required for dine-in orders.").into(),
        );
    }

    let order_id = parse_order_id(&order_id)?;
    let mut order = load_order(&host, &order_id).await?;
    order.apply_update(request);
    let order = store_order(&host, order).await?;

    Ok(Json(json!({
        "message": "Order updated successfully",
        "order": order,
    })))
}

/// `DELETE /orders/{orderId}`
pub async fn delete_order(
    State(host): State<Arc<ServerHost>>,
    Path(order_id): Path<String>,
) -> RestroResult<impl IntoResponse> {
    let order_id = parse_order_id(&order_id)?;
    let order = host
        .orders
        .delete(&order_id)
        .await?
        .ok_or_else(|| EntityError::not_found(ORDER, order_id))?;

    tracing::info!(order_id = %order.order_id, "order deleted");

    Ok(Json(json!({
        "message": "Order deleted successfully",
        "order": order,
    })))
}

/// `PUT /orders/{orderId}/status`
pub async fn update_status(
    State(host): State<Arc<ServerHost>>,
    Path(order_id): Path<String>,
    ValidatedJson(request): ValidatedJson<StatusUpdateRequest>,
) -> RestroResult<impl IntoResponse> {
    let order_id = parse_order_id(&order_id)?;
    let mut order = load_order(&host, &order_id).await?;

    if order.payment_method.is_none() {
        return Err(EntityError::rule(
            ORDER,
            "Order payment method is missing. Please add a payment method before completing the order.",
        )
        .into());
    }

    order.set_status(request.status);
    let order = store_order(&host, order).await?;

    Ok(Json(json!({
        "message": "Order status updated successfully",
        "order": order,
    })))
}

/// `PUT /orders/{orderId}/paymentMethod`
pub async fn update_payment_method(
    State(host): State<Arc<ServerHost>>,
    Path(order_id): Path<String>,
    ValidatedJson(request): ValidatedJson<PaymentMethodRequest>,
) -> RestroResult<impl IntoResponse> {
    let order_id = parse_order_id(&order_id)?;
    let mut order = load_order(&host, &order_id).await?;

    if order.status == OrderStatus::Completed {
        return Err(EntityError::rule(
            ORDER,
            "Order status is completed, so unable to add payment method.",
        )
        .into());
    }

    order.set_payment_method(request.payment_method);
    let order = store_order(&host, order).await?;

    Ok(Json(json!({
        "message": "Order payment updated successfully",
        "order": order,
    })))
}
