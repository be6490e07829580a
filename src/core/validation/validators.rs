//! Reusable field validators
//!
//! Plugged into `#[validate(custom(function = "..."))]` attributes on request
//! payloads.

use crate::entities::order::OrderItem;
use chrono::NaiveDate;
use std::borrow::Cow;
use validator::ValidationError;

/// Format of every calendar date the API accepts and stores
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Validator: value is a `YYYY-MM-DD` calendar date
pub fn validate_order_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| error("date", "must be a date formatted YYYY-MM-DD"))
}

/// Validator: an order carries at least one item
#[allow(clippy::ptr_arg)]
pub fn validate_order_items(items: &Vec<OrderItem>) -> Result<(), ValidationError> {
    if items.is_empty() {
        Err(error("items", "at least one item is required"))
    } else {
        Ok(())
    }
}

/// Validator: value is not blank once trimmed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("blank", "must not be blank"))
    } else {
        Ok(())
    }
}
