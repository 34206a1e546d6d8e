use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use innkeep_core::{Availability, BlockPolicy};
use serde::Deserialize;

use crate::error::{required_fields, AppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub room_id: Option<String>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/check-availability", post(check_availability))
}

/// Runs the check for either route. Every failure past field validation
/// is a 500 carrying the underlying message.
pub(crate) async fn run_check(
    state: &AppState,
    payload: Result<Json<AvailabilityRequest>, JsonRejection>,
    policy: BlockPolicy,
) -> Result<Availability, AppError> {
    let Json(req) = payload.map_err(|e| AppError::InternalServerError(e.body_text()))?;
    let [room_id, check_in, check_out] =
        required_fields([req.room_id, req.check_in_date, req.check_out_date])?;

    state
        .availability
        .check_availability(&room_id, &check_in, &check_out, policy)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))
}

async fn check_availability(
    State(state): State<AppState>,
    payload: Result<Json<AvailabilityRequest>, JsonRejection>,
) -> Result<Json<Availability>, AppError> {
    let availability = run_check(&state, payload, BlockPolicy::IgnoreBlocks).await?;
    Ok(Json(availability))
}
