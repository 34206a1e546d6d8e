use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use innkeep_core::CoreError;
use innkeep_shared::models::{
    BanquetEnquiry, ContactMessage, NewBanquetEnquiry, NewContactMessage, NewTableBooking,
    TableBooking, Venue,
};
use innkeep_shared::{parse_calendar_date, Masked};
use serde::Deserialize;

use crate::error::{optional_field, required_fields, AppError};
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBookingRequest {
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub guest_email: Option<String>,
    pub booking_date: Option<String>,
    pub booking_time: Option<String>,
    pub number_of_guests: Option<i32>,
    pub venue: Option<String>,
    pub special_requests: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanquetEnquiryRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub event_date: Option<String>,
    pub event_type: Option<String>,
    pub expected_guests: Option<i32>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/table-bookings", post(create_table_booking))
        .route("/api/banquet-enquiries", post(create_banquet_enquiry))
        .route("/api/contact-messages", post(create_contact_message))
}

fn guest_count(value: Option<i32>) -> Result<i32, AppError> {
    match value {
        None => Err(AppError::missing_fields()),
        Some(n) if n < 1 => Err(AppError::ValidationError("At least one guest is required".to_string())),
        Some(n) => Ok(n),
    }
}

fn masked_optional(value: Option<String>) -> Option<Masked<String>> {
    optional_field(value).map(Masked)
}

fn date_field(value: &str) -> Result<chrono::NaiveDate, AppError> {
    parse_calendar_date(value).map_err(|e| AppError::lookup(CoreError::from(e)))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/table-bookings
pub async fn create_table_booking(
    State(state): State<AppState>,
    payload: Result<Json<TableBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TableBooking>), AppError> {
    let Json(req) = payload.map_err(AppError::bad_json)?;
    let [guest_name, guest_phone, booking_date, booking_time, venue] = required_fields([
        req.guest_name,
        req.guest_phone,
        req.booking_date,
        req.booking_time,
        req.venue,
    ])?;
    let number_of_guests = guest_count(req.number_of_guests)?;
    let venue: Venue = venue
        .parse()
        .map_err(|e: innkeep_shared::models::UnknownStatus| AppError::ValidationError(e.to_string()))?;

    let record = state
        .enquiries
        .create_table_booking(NewTableBooking {
            guest_name,
            guest_phone: Masked(guest_phone),
            guest_email: masked_optional(req.guest_email),
            booking_date: date_field(&booking_date)?,
            booking_time,
            number_of_guests,
            venue,
            special_requests: optional_field(req.special_requests),
        })
        .await
        .map_err(CoreError::from)?;

    tracing::info!(id = %record.id, venue = %record.venue, "Table booking requested");
    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /api/banquet-enquiries
pub async fn create_banquet_enquiry(
    State(state): State<AppState>,
    payload: Result<Json<BanquetEnquiryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BanquetEnquiry>), AppError> {
    let Json(req) = payload.map_err(AppError::bad_json)?;
    let [name, phone, event_date, event_type] =
        required_fields([req.name, req.phone, req.event_date, req.event_type])?;
    let expected_guests = guest_count(req.expected_guests)?;

    let record = state
        .enquiries
        .create_banquet_enquiry(NewBanquetEnquiry {
            name,
            phone: Masked(phone),
            email: masked_optional(req.email),
            event_date: date_field(&event_date)?,
            event_type,
            expected_guests,
            message: optional_field(req.message),
        })
        .await
        .map_err(CoreError::from)?;

    tracing::info!(id = %record.id, event_date = %record.event_date, "Banquet enquiry received");
    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /api/contact-messages
pub async fn create_contact_message(
    State(state): State<AppState>,
    payload: Result<Json<ContactMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactMessage>), AppError> {
    let Json(req) = payload.map_err(AppError::bad_json)?;
    let [name, email, subject, message] =
        required_fields([req.name, req.email, req.subject, req.message])?;

    let record = state
        .enquiries
        .create_contact_message(NewContactMessage {
            name,
            email: Masked(email),
            phone: masked_optional(req.phone),
            subject,
            message,
        })
        .await
        .map_err(CoreError::from)?;

    tracing::info!(id = %record.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(record)))
}
