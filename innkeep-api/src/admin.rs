use axum::{
    extract::{rejection::JsonRejection, Path, State},
    middleware::from_fn_with_state,
    routing::{patch, post},
    Json, Router,
};
use innkeep_core::BlockPolicy;
use innkeep_shared::models::{Booking, BookingStatusUpdate, NewRoomBlock, RoomBlock};
use innkeep_shared::parse_calendar_date;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::availability::{run_check, AvailabilityRequest};
use crate::error::{required_fields, AppError};
use crate::middleware::auth::admin_session_middleware;
use crate::state::AppState;

fn block_create_failed(err: &dyn std::fmt::Display) -> AppError {
    tracing::error!("Room block not created: {}", err);
    AppError::InternalServerError("Failed to create room block".to_string())
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAvailabilityResponse {
    pub available: bool,
    pub available_units: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlockRequest {
    pub room_id: Option<String>,
    pub room_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateBlockResponse {
    pub ok: bool,
    pub block: RoomBlock,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBlockRequest {
    pub block_id: Option<String>,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/admin/rooms/availability", post(check_availability))
        .route("/api/admin/rooms/blocks/create", post(create_block))
        .route("/api/admin/rooms/blocks/delete", post(delete_block))
        .route("/api/admin/bookings/{id}/status", patch(update_booking_status))
        .route_layer(from_fn_with_state(state, admin_session_middleware))
}

// ============================================================================
// Availability
// ============================================================================

/// POST /api/admin/rooms/availability
///
/// Same count as the guest check, except that an overlapping block closes
/// the whole room type.
pub async fn check_availability(
    State(state): State<AppState>,
    payload: Result<Json<AvailabilityRequest>, JsonRejection>,
) -> Result<Json<AdminAvailabilityResponse>, AppError> {
    let availability = run_check(&state, payload, BlockPolicy::WholeRoomType).await?;

    Ok(Json(AdminAvailabilityResponse {
        available: availability.available,
        available_units: availability.available_units,
    }))
}

// ============================================================================
// Room Blocks
// ============================================================================

/// POST /api/admin/rooms/blocks/create
pub async fn create_block(
    State(state): State<AppState>,
    payload: Result<Json<CreateBlockRequest>, JsonRejection>,
) -> Result<Json<CreateBlockResponse>, AppError> {
    let Json(req) = payload.map_err(AppError::bad_json)?;
    let [room_id, room_name, start_date, end_date, reason] = required_fields([
        req.room_id,
        req.room_name,
        req.start_date,
        req.end_date,
        req.reason,
    ])?;

    let new_block = NewRoomBlock {
        room_id: Uuid::parse_str(&room_id).map_err(|e| block_create_failed(&e))?,
        room_name,
        start_date: parse_calendar_date(&start_date).map_err(|e| block_create_failed(&e))?,
        end_date: parse_calendar_date(&end_date).map_err(|e| block_create_failed(&e))?,
        reason,
    };

    let block = state
        .blocks
        .create_block(new_block)
        .await
        .map_err(|e| block_create_failed(&e))?;

    tracing::info!(block_id = %block.id, room_id = %block.room_id, "Room block created");
    Ok(Json(CreateBlockResponse { ok: true, block }))
}

/// POST /api/admin/rooms/blocks/delete
pub async fn delete_block(
    State(state): State<AppState>,
    payload: Result<Json<DeleteBlockRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload.map_err(AppError::bad_json)?;
    let [block_id] = required_fields([req.block_id])?;

    let not_found = || AppError::NotFoundError("Room block not found".to_string());
    let id = Uuid::parse_str(&block_id).map_err(|_| not_found())?;

    let deleted = state
        .blocks
        .delete_block(id)
        .await
        .map_err(innkeep_core::CoreError::from)?;
    if !deleted {
        return Err(not_found());
    }

    tracing::info!(block_id = %id, "Room block deleted");
    Ok(Json(json!({ "ok": true })))
}

// ============================================================================
// Bookings
// ============================================================================

/// PATCH /api/admin/bookings/{id}/status
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BookingStatusUpdate>, JsonRejection>,
) -> Result<Json<Booking>, AppError> {
    let Json(update) = payload.map_err(AppError::bad_json)?;
    let id = Uuid::parse_str(&id).map_err(|_| AppError::NotFoundError("Booking not found".to_string()))?;

    let booking = state
        .bookings
        .update_status(id, &update)
        .await
        .map_err(AppError::lookup)?;

    Ok(Json(booking))
}
