use super::{error, validate_credentials};
use crate::api::ErrorResponse;
use crate::auth::{create_session, hash_password};
use crate::get_conn;
use crate::models::{NewUser, User};
use crate::schema::users;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignupResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body(content = SignupRequest, example = json!({"username": "user", "password": "password"})),
    responses(
        (status = 201, description = "User created successfully", body = SignupResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };

    if let Err(message) = validate_credentials(&req.username, &req.password) {
        return error(StatusCode::BAD_REQUEST, message);
    }

    let mut conn = get_conn!(state.pool);

    let password_hash = match hash_password(&req.password) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to hash password");
        }
    };

    let new_user = NewUser {
        username: req.username.trim(),
        password_hash: &password_hash,
    };

    let user: User = match diesel::insert_into(users::table)
        .values(&new_user)
        .returning(User::as_returning())
        .get_result(&mut conn)
    {
        Ok(u) => u,
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => return error(StatusCode::CONFLICT, "Username already exists"),
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            return error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create user");
        }
    };

    tracing::info!(user_id = %user.id, "User signed up");

    match create_session(&mut conn, user.id, state.config.session_ttl()) {
        Ok(token) => (
            StatusCode::CREATED,
            Json(SignupResponse {
                user_id: user.id,
                token,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create session: {}", e);
            error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session")
        }
    }
}
