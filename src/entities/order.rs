//! Orders, their line items and the request payloads that create and edit them

use crate::core::field::{FieldValue, Filterable};
use crate::core::sequence::DisplayId;
use crate::core::validation::validators::{validate_order_date, validate_order_items};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Serialized field names, shared by search predicates and storage queries
pub mod fields {
    pub const ORDER_ID: &str = "orderId";
    pub const DISPLAY_ID: &str = "displayId";
    pub const TABLE_NUMBER: &str = "tableNumber";
    pub const ORDER_DATE: &str = "orderDate";
    pub const PICKUP_ORDER: &str = "pickupOrder";
    pub const ONLINE_ORDER: &str = "onlineOrder";
    pub const STATUS: &str = "status";
    pub const PAYMENT_METHOD: &str = "paymentMethod";
    pub const ORDER_ITEMS: &str = "orderItems";
    pub const CREATED_AT: &str = "createdAt";
}

/// Lifecycle state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    #[default]
    InProgress,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::InProgress => "INPROGRESS",
            OrderStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the customer receives the order, derived from the two order flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Pickup,
    DineIn,
    Online,
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pickup" => Ok(OrderType::Pickup),
            "dine_in" => Ok(OrderType::DineIn),
            "online" => Ok(OrderType::Online),
            other => Err(format!("unknown order type '{}'", other)),
        }
    }
}

/// Delivery address, only meaningful for online orders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 32))]
    pub phone_number: Option<String>,
}

/// A single line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[validate(length(min = 1, message = "itemId is required"))]
    pub item_id: String,
    #[validate(length(min = 1, message = "itemName is required"))]
    pub item_name: String,
    pub category: String,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A restaurant order
///
/// `order_id` is the internal identifier used in URLs, `display_id` the
/// human-readable code printed on bills. Both are fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: Uuid,
    pub display_id: DisplayId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<u32>,
    pub order_date: String,
    pub pickup_order: bool,
    pub online_order: bool,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub order_items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Build a new order from a validated create request
    pub fn new(display_id: DisplayId, request: CreateOrderRequest) -> Self {
        let now = Utc::now();
        Self {
            order_id: Uuid::new_v4(),
            display_id,
            table_number: request.table_number,
            order_date: request.order_date,
            pickup_order: request.pickup_order,
            online_order: request.online_order,
            address: request.address,
            status: request.status,
            payment_method: None,
            order_items: request.order_items,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of `price * quantity` over all items
    pub fn total(&self) -> f64 {
        self.order_items.iter().map(OrderItem::line_total).sum()
    }

    pub fn order_type(&self) -> OrderType {
        if self.pickup_order {
            OrderType::Pickup
        } else if self.online_order {
            OrderType::Online
        } else {
            OrderType::DineIn
        }
    }

    pub fn is_active(&self) -> bool {
        self.status != OrderStatus::Completed
    }

    /// Apply an edit, keeping identity, status and payment untouched
    ///
    /// A pickup order keeps whatever table number it had before.
    pub fn apply_update(&mut self, update: UpdateOrderRequest) {
        if !update.pickup_order {
            self.table_number = update.table_number;
        }
        self.order_date = update.order_date;
        self.order_items = update.order_items;
        self.pickup_order = update.pickup_order;
        self.online_order = update.online_order;
        self.touch();
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.touch();
    }

    pub fn set_payment_method(&mut self, payment_method: String) {
        self.payment_method = Some(payment_method);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Filterable for Order {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            fields::ORDER_ID => Some(self.order_id.to_string().into()),
            fields::DISPLAY_ID => Some(self.display_id.as_str().into()),
            fields::TABLE_NUMBER => Some(
                self.table_number
                    .map(|n| FieldValue::Integer(i64::from(n)))
                    .unwrap_or(FieldValue::Null),
            ),
            fields::ORDER_DATE => Some(self.order_date.as_str().into()),
            fields::PICKUP_ORDER => Some(self.pickup_order.into()),
            fields::ONLINE_ORDER => Some(self.online_order.into()),
            fields::STATUS => Some(self.status.as_str().into()),
            fields::PAYMENT_METHOD => Some(self.payment_method.clone().into()),
            _ => None,
        }
    }
}

// =============================================================================
// Request payloads
// =============================================================================

/// Body of `POST /orders`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub table_number: Option<u32>,
    #[validate(custom(function = "validate_order_items"), nested)]
    pub order_items: Vec<OrderItem>,
    #[validate(custom(function = "validate_order_date"))]
    pub order_date: String,
    #[serde(default)]
    pub pickup_order: bool,
    #[serde(default)]
    pub online_order: bool,
    #[serde(default)]
    #[validate(nested)]
    pub address: Address,
    #[serde(default)]
    pub status: OrderStatus,
}

impl CreateOrderRequest {
    /// Dine-in orders must name the table they are served at
    pub fn requires_table(&self) -> bool {
        !self.pickup_order && !self.online_order
    }
}

/// Body of `PUT /orders/{orderId}`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub table_number: Option<u32>,
    #[serde(default)]
    #[validate(nested)]
    pub order_items: Vec<OrderItem>,
    #[validate(custom(function = "validate_order_date"))]
    pub order_date: String,
    #[serde(default)]
    pub pickup_order: bool,
    #[serde(default)]
    pub online_order: bool,
}

impl UpdateOrderRequest {
    pub fn requires_table(&self) -> bool {
        !self.pickup_order && !self.online_order
    }
}

/// Body of `PUT /orders/{orderId}/status`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}

/// Body of `PUT /orders/{orderId}/paymentMethod`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodRequest {
    #[validate(length(min = 1, message = "paymentMethod is required"))]
    pub payment_method: String,
}
