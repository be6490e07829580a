//! HTTP handlers for menu categories

use crate::core::error::{EntityError, RestroResult};
use crate::core::validation::ValidatedJson;
use crate::entities::{Category, CreateCategoryRequest};
use crate::server::host::ServerHost;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use std::sync::Arc;

/// `GET /category`
pub async fn list_categories(
    State(host): State<Arc<ServerHost>>,
) -> RestroResult<impl IntoResponse> {
    let categories = host.categories.list().await?;
    if categories.is_empty() {
        return Err(EntityError::none_found("category").into());
    }
    Ok(Json(categories))
}

/// `POST /category`
pub async fn create_category(
    State(host): State<Arc<ServerHost>>,
    ValidatedJson(request): ValidatedJson<CreateCategoryRequest>,
) -> RestroResult<impl IntoResponse> {
    let category = host.categories.create(Category::new(request)).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Category created successfully",
            "category": category,
        })),
    ))
}
