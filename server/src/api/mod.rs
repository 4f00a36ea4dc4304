pub mod public;
pub mod recipes;
pub mod shopping_lists;
pub mod testing;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mise_core::{StoreError, StructuredIngredient};
use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};


/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Core store failure, rendered as an `ErrorResponse`.
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError(e)
    }
}

/// Malformed bodies are validation failures like any other bad input.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(StoreError::Validation(rejection.body_text()))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFoundOrUnauthorized => StatusCode::NOT_FOUND,
            StoreError::Authentication => StatusCode::UNAUTHORIZED,
            StoreError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = if status.is_server_error() {
            // Repository details stay in the logs
            tracing::error!("Store operation failed: {}", self.0);
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(
        info(title = "mise", description = "Recipe box and shopping list API"),
        components(schemas(ErrorResponse, StructuredIngredient))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        public::ApiDoc::openapi(),
        testing::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        shopping_lists::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use mise_core::RepositoryError;

    #[test]
    fn test_store_errors_map_to_status_codes() {
        let cases = [
            (StoreError::validation("bad"), StatusCode::BAD_REQUEST),
            (StoreError::NotFoundOrUnauthorized, StatusCode::NOT_FOUND),
            (StoreError::Authentication, StatusCode::UNAUTHORIZED),
            (
                StoreError::Repository(RepositoryError::Unavailable("down".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError(error).into_response().status(), expected);
        }
    }

    #[test]
    fn test_openapi_contains_every_route() {
        let spec = openapi();
        for path in [
            "/api/auth/signup",
            "/api/auth/login",
            "/api/test/unauthed-ping",
            "/api/test/ping",
            "/api/recipes",
            "/api/recipes/{id}",
            "/api/recipes/{id}/favorite",
            "/api/recipes/{id}/scaled",
            "/api/recipes/{id}/scaled/print",
            "/api/shopping-lists",
            "/api/shopping-lists/preview",
            "/api/shopping-lists/{id}",
            "/api/shopping-lists/{id}/print",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
