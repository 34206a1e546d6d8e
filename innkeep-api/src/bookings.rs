use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use innkeep_core::{BookingRequest, CoreError};
use innkeep_shared::models::Booking;
use innkeep_shared::{Masked, StayRange};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{optional_field, required_fields, AppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub room_id: Option<String>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub number_of_guests: Option<i32>,
    pub special_requests: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/{id}", get(get_booking))
}

/// POST /api/bookings
///
/// Amounts come from the stored room, never from the request.
pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let Json(req) = payload.map_err(AppError::bad_json)?;
    let [room_id, guest_name, guest_email, guest_phone, check_in, check_out] = required_fields([
        req.room_id,
        req.guest_name,
        req.guest_email,
        req.guest_phone,
        req.check_in_date,
        req.check_out_date,
    ])?;

    let stay = StayRange::parse(&check_in, &check_out).map_err(|e| AppError::lookup(CoreError::from(e)))?;

    let booking = state
        .bookings
        .create_booking(BookingRequest {
            room_id,
            guest_name,
            guest_email: Masked(guest_email),
            guest_phone: Masked(guest_phone),
            stay,
            number_of_guests: req.number_of_guests.unwrap_or(1),
            special_requests: optional_field(req.special_requests),
        })
        .await
        .map_err(AppError::lookup)?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::NotFoundError("Booking not found".to_string()))?;
    let booking = state.bookings.get_booking(id).await.map_err(AppError::lookup)?;
    Ok(Json(booking))
}
