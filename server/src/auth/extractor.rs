use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::models::User;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use mise_core::Caller;
use std::sync::Arc;

use super::db::get_user_from_token;

/// Extractor that validates the Authorization header and provides the authenticated user.
///
/// Use this in any handler that requires authentication:
/// ```ignore
/// async fn my_handler(user: AuthUser) -> impl IntoResponse {
///     // user.0 is the authenticated User
/// }
/// ```
pub struct AuthUser(pub User);

impl AuthUser {
    /// Identity context for core operations.
    pub fn caller(&self) -> Caller {
        Caller::authenticated(self.0.id)
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingHeader,
    InvalidHeader,
    InvalidFormat,
    InvalidToken,
    Unavailable,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingHeader => (StatusCode::UNAUTHORIZED, "Missing Authorization header"),
            AuthError::InvalidHeader => (StatusCode::UNAUTHORIZED, "Invalid Authorization header"),
            AuthError::InvalidFormat => (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format",
            ),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
            AuthError::Unavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication temporarily unavailable",
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::InvalidHeader)?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidFormat)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<DbPool>: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = Arc::<DbPool>::from_ref(state);
        let token = bearer_token(parts)?;

        let user = get_user_from_token(&pool, token)
            .await
            .map_err(|e| {
                tracing::error!("Failed to look up session: {}", e);
                AuthError::Unavailable
            })?
            .ok_or(AuthError::InvalidToken)?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use diesel::r2d2::{self, ConnectionManager};
    use diesel::PgConnection;
    use std::time::Duration;

    fn parts(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/recipes");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_extracted() {
        let p = parts(Some("Bearer abc123"));
        assert_eq!(bearer_token(&p).unwrap(), "abc123");
    }

    #[test]
    fn test_missing_or_malformed_header_rejected() {
        assert!(matches!(
            bearer_token(&parts(None)),
            Err(AuthError::MissingHeader)
        ));
        assert!(matches!(
            bearer_token(&parts(Some("Basic dXNlcjpwYXNz"))),
            Err(AuthError::InvalidFormat)
        ));
        assert!(matches!(
            bearer_token(&parts(Some("Bearer   "))),
            Err(AuthError::InvalidFormat)
        ));
    }

    #[test]
    fn test_auth_errors_are_unauthorized() {
        let response = AuthError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    /// Pool pointing at a port nothing listens on; checkouts time out.
    fn unreachable_pool() -> Arc<DbPool> {
        let manager = ConnectionManager::<PgConnection>::new("postgres://mise@127.0.0.1:1/mise");
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .connection_timeout(Duration::from_millis(200))
            .build_unchecked(manager);
        Arc::new(pool)
    }

    #[tokio::test]
    async fn test_database_outage_is_server_error_not_unauthorized() {
        let pool = unreachable_pool();
        let mut p = parts(Some("Bearer abc123"));

        let rejection = match AuthUser::from_request_parts(&mut p, &pool).await {
            Ok(_) => panic!("lookup against an unreachable database must fail"),
            Err(e) => e,
        };
        assert!(matches!(rejection, AuthError::Unavailable));
        assert_eq!(
            rejection.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
