use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use innkeep_core::CoreError;
use innkeep_shared::models::Room;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/rooms", get(list_rooms))
        .route("/api/rooms/{slug}", get(get_room))
}

/// GET /api/rooms
///
/// Listed rooms only, cheapest first.
pub async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<Room>>, AppError> {
    let rooms = state.rooms.list_listed_rooms().await.map_err(CoreError::from)?;
    Ok(Json(rooms))
}

/// GET /api/rooms/{slug}
pub async fn get_room(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Room>, AppError> {
    state
        .rooms
        .get_listed_room_by_slug(&slug)
        .await
        .map_err(CoreError::from)?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError("Room not found".to_string()))
}
