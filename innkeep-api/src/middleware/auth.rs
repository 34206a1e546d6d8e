use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::{AppState, AuthConfig};

pub const ADMIN_SESSION_COOKIE: &str = "admin-session";

const ADMIN_ROLE: &str = "ADMIN";

// ============================================================================
// Session Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminClaims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

pub fn issue_admin_token(auth: &AuthConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = AdminClaims {
        sub: "admin".to_owned(),
        role: ADMIN_ROLE.to_owned(),
        exp: (Utc::now() + Duration::seconds(auth.expiration as i64)).timestamp() as usize,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(auth.secret.as_bytes()))
}

// ============================================================================
// Admin Session Middleware
// ============================================================================

/// Admits the request only with a signed, unexpired `admin-session` cookie.
pub async fn admin_session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract cookie
    let token = jar
        .get(ADMIN_SESSION_COOKIE)
        .map(|c| c.value())
        .filter(|v| !v.is_empty())
        .ok_or_else(AppError::unauthorized)?;

    // 2. Verify signature and expiry
    let mut validation = Validation::default();
    validation.leeway = 0;
    let token_data = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(state.auth.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::warn!("Rejected admin session: {}", e);
        AppError::unauthorized()
    })?;

    // 3. Check role
    if token_data.claims.role != ADMIN_ROLE {
        return Err(AppError::unauthorized());
    }

    // 4. Inject claims
    req.extensions_mut().insert(token_data.claims);

    Ok(next.run(req).await)
}
