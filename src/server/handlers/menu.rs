//! HTTP handlers for the menu

use crate::core::error::{EntityError, RestroResult};
use crate::core::validation::ValidatedJson;
use crate::entities::{CreateMenuRequest, MenuItem, UpdateMenuItemRequest};
use crate::server::host::ServerHost;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;

const MENU_ITEM: &str = "Menu item";

/// `POST /menu`
///
/// Items are stored one by one; a duplicate `itemId` stops the batch at that item.
pub async fn create_menu_items(
    State(host): State<Arc<ServerHost>>,
    ValidatedJson(request): ValidatedJson<CreateMenuRequest>,
) -> RestroResult<impl IntoResponse> {
    for item in request.menu_items {
        if host.menu.find_by_item_id(&item.item_id).await?.is_some() {
            return Err(EntityError::already_exists("Item", &item.item_id).into());
        }
        host.menu.create(MenuItem::new(item)).await?;
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Menu items created successfully" })),
    ))
}

/// `GET /menu`
pub async fn list_menu(State(host): State<Arc<ServerHost>>) -> RestroResult<impl IntoResponse> {
    let items = host.menu.list().await?;
    if items.is_empty() {
        return Err(EntityError::none_found("menu").into());
    }
    Ok(Json(items))
}

/// `PUT /menu/{itemId}`
pub async fn update_menu_item(
    State(host): State<Arc<ServerHost>>,
    Path(item_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateMenuItemRequest>,
) -> RestroResult<impl IntoResponse> {
    let mut item = host
        .menu
        .find_by_item_id(&item_id)
        .await?
        .ok_or_else(|| EntityError::not_found(MENU_ITEM, &item_id))?;

    item.apply_update(request);
    let item = host
        .menu
        .update(item)
        .await?
        .ok_or_else(|| EntityError::not_found(MENU_ITEM, &item_id))?;

    Ok(Json(json!({
        "message": "Menu item updated successfully",
        "menuItem": item,
    })))
}

/// `DELETE /menu/{itemId}`
pub async fn delete_menu_item(
    State(host): State<Arc<ServerHost>>,
    Path(item_id): Path<String>,
) -> RestroResult<impl IntoResponse> {
    host.menu
        .delete(&item_id)
        .await?
        .ok_or_else(|| EntityError::not_found(MENU_ITEM, &item_id))?;

    Ok(Json(json!({ "message": "Menu item deleted successfully" })))
}
