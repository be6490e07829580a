//! HTTP handlers for bills and the order export

use crate::core::error::{EntityError, RestroError, RestroResult, ValidationError};
use crate::core::validation::ValidatedJson;
use crate::documents::{Bill, PersonItem, XLSX_CONTENT_TYPE, export_rows, orders_workbook, render_pdf};
use crate::entities::Order;
use crate::server::host::ServerHost;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Body of `POST /generate-bill-for-person`
///
/// An empty `personItems` is rejected in the handler, after the order lookup.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PersonBillRequest {
    pub order_id: String,
    #[serde(default)]
    pub person_index: u32,
    #[serde(default)]
    pub person_items: Vec<PersonItem>,
}

async fn find_order(host: &ServerHost, raw: &str) -> RestroResult<Order> {
    let order_id = Uuid::parse_str(raw).map_err(|_| ValidationError::InvalidUuid {
        value: raw.to_string(),
    })?;
    host.orders
        .get(&order_id)
        .await?
        .ok_or_else(|| EntityError::not_found("Order", order_id).into())
}

fn download(content_type: &str, disposition: String, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

/// `GET /generate-bill/{orderId}`
pub async fn generate_bill(
    State(host): State<Arc<ServerHost>>,
    Path(order_id): Path<String>,
) -> RestroResult<Response> {
    let order = find_order(&host, &order_id).await?;
    let pdf = render_pdf(&Bill::for_order(&order), &host.bill).map_err(RestroError::internal)?;

    tracing::info!(display_id = %order.display_id, "bill generated");
    Ok(download(
        PDF_CONTENT_TYPE,
        format!("inline; filename=bill_{}.pdf", order.display_id),
        pdf,
    ))
}

/// `POST /generate-bill-for-person`
///
/// The order must exist before the item list is looked at.
pub async fn generate_bill_for_person(
    State(host): State<Arc<ServerHost>>,
    ValidatedJson(request): ValidatedJson<PersonBillRequest>,
) -> RestroResult<Response> {
    let order = find_order(&host, &request.order_id).await?;
    if request.person_items.is_empty() {
        return Err(
            ValidationError::field("personItems", "No items selected for this person").into(),
        );
    }

    let bill = Bill::for_person(&order, &request.person_items);
    let pdf = render_pdf(&bill, &host.bill).map_err(RestroError::internal)?;

    let filename = format!(
        "bill_person_{}_{}.pdf",
        u64::from(request.person_index) + 1,
        order.display_id
    );
    tracing::info!(display_id = %order.display_id, person = request.person_index, "split bill generated");
    Ok(download(
        PDF_CONTENT_TYPE,
        format!("attachment; filename={}", filename),
        pdf,
    ))
}

/// `GET /orders/exportData`
pub async fn export_orders(State(host): State<Arc<ServerHost>>) -> RestroResult<Response> {
    let orders = host.orders.all().await?;
    if orders.is_empty() {
        return Err(EntityError::none_found_to("orders", "export").into());
    }

    let rows = export_rows(&orders);
    let workbook = orders_workbook(&rows).map_err(RestroError::internal)?;

    tracing::info!(orders = orders.len(), rows = rows.len(), "orders exported");
    Ok(download(
        XLSX_CONTENT_TYPE,
        "attachment; filename=orders.xlsx".to_string(),
        workbook,
    ))
}
