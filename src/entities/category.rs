//! Menu categories
use crate::core::validation::validators::validate_not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(request: CreateCategoryRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            category_id: request.category_id,
            category_name: request.category_name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `POST /category`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub category_id: String,
    #[serde(default)]
    pub category_name: Option<String>,
}
