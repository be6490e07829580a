//! Menu items
use crate::core::validation::validators::validate_not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: Uuid,
    /// Business identifier, unique across the menu
    pub item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    pub price: f64,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    pub fn new(item: NewMenuItem) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            item_id: item.item_id,
            item_name: item.item_name,
            price: item.price,
            category: item.category,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateMenuItemRequest) {
        self.item_name = update.item_name;
        self.price = update.price;
        self.category = update.category;
        self.updated_at = Utc::now();
    }
}

/// One entry of `POST /menu`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    #[validate(custom(function = "validate_not_blank"))]
    pub item_id: String,
    #[serde(default)]
    pub item_name: Option<String>,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
    pub category: String,
}

/// Body of `POST /menu`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuRequest {
    #[validate(
        length(
            min = 1,
            message = "Invalid request, menuItems should be an array with at least one item."
        ),
        nested
    )]
    pub menu_items: Vec<NewMenuItem>,
}

/// Body of `PUT /menu/{itemId}`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemRequest {
    #[serde(default)]
    pub item_name: Option<String>,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
    pub category: String,
}
