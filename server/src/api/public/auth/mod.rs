pub mod login;
pub mod signup;

use crate::api::ErrorResponse;
use axum::{http::StatusCode, response::IntoResponse, Json};

/// Reject blank credentials before touching the database.
fn validate_credentials(username: &str, password: &str) -> Result<(), &'static str> {
    if username.trim().is_empty() {
        return Err("Username is required");
    }
    if password.is_empty() {
        return Err("Password is required");
    }
    Ok(())
}

fn error(status: StatusCode, message: &str) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
