use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{required_fields, AppError};
use crate::middleware::auth::{issue_admin_token, ADMIN_SESSION_COOKIE};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct LoginRequest {
    password: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/admin/session", post(login_admin).delete(logout_admin))
}

fn session_cookie(value: String) -> Cookie<'static> {
    Cookie::build((ADMIN_SESSION_COOKIE, value))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .build()
}

async fn login_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<Value>), AppError> {
    let Json(req) = payload.map_err(AppError::bad_json)?;
    let [password] = required_fields([req.password])?;

    if password != state.auth.admin_password {
        tracing::warn!("Admin login rejected");
        return Err(AppError::unauthorized());
    }

    let token = issue_admin_token(&state.auth)
        .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))?;

    tracing::info!("Admin session started");
    Ok((jar.add(session_cookie(token)), Json(json!({ "ok": true }))))
}

async fn logout_admin(jar: CookieJar) -> (CookieJar, Json<Value>) {
    (jar.remove(session_cookie(String::new())), Json(json!({ "ok": true })))
}
