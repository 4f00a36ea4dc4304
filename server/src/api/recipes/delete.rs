use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use mise_core::RecipeStore;
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_recipe(
    user: AuthUser,
    State(store): State<RecipeStore>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    store.remove_recipe(&user.caller(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
