use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use innkeep_core::CoreError;
use serde_json::json;

pub const MISSING_FIELDS: &str = "Missing required fields";

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    ValidationError(String),
    NotFoundError(String),
    /// 500 whose message is returned to the caller as-is.
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    pub fn unauthorized() -> Self {
        Self::AuthenticationError("Unauthorized".to_string())
    }

    pub fn missing_fields() -> Self {
        Self::ValidationError(MISSING_FIELDS.to_string())
    }

    /// Maps domain failures on routes where an unknown record is a 404.
    pub fn lookup(err: CoreError) -> Self {
        match err {
            CoreError::RoomNotFound(_) => Self::NotFoundError("Room not found".to_string()),
            CoreError::BookingNotFound(_) => Self::NotFoundError("Booking not found".to_string()),
            CoreError::ValidationError(msg) => Self::ValidationError(msg),
            CoreError::InvalidDate(e) => Self::ValidationError(e.to_string()),
            other @ CoreError::QueryFailed(_) => Self::Anyhow(other.into()),
        }
    }

    pub fn bad_json(rejection: JsonRejection) -> Self {
        Self::ValidationError(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            },
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            },
        };

        if status.is_client_error() {
            tracing::debug!(%status, "Request rejected: {}", error_message);
        }

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Anyhow(err.into())
    }
}

/// Unwraps required string fields, treating absent and empty alike.
pub fn required_fields<const N: usize>(fields: [Option<String>; N]) -> Result<[String; N], AppError> {
    if fields.iter().any(|f| f.as_deref().map_or(true, str::is_empty)) {
        return Err(AppError::missing_fields());
    }
    Ok(fields.map(Option::unwrap_or_default))
}

/// Empty optional strings are stored as absent.
pub fn optional_field(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty())
}
