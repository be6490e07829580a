//! HTTP handlers for reservations

use crate::core::error::{EntityError, RestroResult};
use crate::core::validation::ValidatedJson;
use crate::entities::{Booking, CreateBookingRequest};
use crate::server::host::ServerHost;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use std::sync::Arc;

/// `POST /reservations`
pub async fn create_booking(
    State(host): State<Arc<ServerHost>>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> RestroResult<impl IntoResponse> {
    let booking = host.bookings.create(Booking::new(request)).await?;
    tracing::info!(booking_id = %booking.id, date = %booking.booking_date, "booking created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Booking created successfully",
            "booking": {
                "bookingId": booking.id,
                "status": true,
            },
        })),
    ))
}

/// `GET /reservations`
pub async fn list_bookings(State(host): State<Arc<ServerHost>>) -> RestroResult<impl IntoResponse> {
    let bookings = host.bookings.list().await?;
    if bookings.is_empty() {
        return Err(EntityError::none_found("reservation").into());
    }
    Ok(Json(bookings))
}
