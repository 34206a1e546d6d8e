pub mod auth;

pub use auth::{admin_session_middleware, issue_admin_token, AdminClaims, ADMIN_SESSION_COOKIE};
