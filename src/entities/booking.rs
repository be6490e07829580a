//! Table reservations

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub booking_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_name: Option<String>,
    pub number_of_people: u32,
    pub booking_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(request: CreateBookingRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            booking_date: request.booking_date,
            booking_name: request.booking_name,
            number_of_people: request.number_of_people,
            booking_time: request.booking_time,
            phone_number: request.phone_number,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `POST /reservations`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub booking_date: NaiveDate,
    #[serde(default)]
    pub booking_name: Option<String>,
    #[validate(range(min = 1, message = "numberOfPeople must be at least 1"))]
    pub number_of_people: u32,
    #[validate(length(min = 1, message = "bookingTime is required"))]
    pub booking_time: String,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub phone_number: Option<String>,
}
