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
    path = "/api/shopping-lists/{id}",
    tag = "shopping-lists",
    params(
        ("id" = Uuid, Path, description = "Shopping list ID")
    ),
    responses(
        (status = 204, description = "Shopping list deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Shopping list not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_shopping_list(
    user: AuthUser,
    State(store): State<RecipeStore>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    store.delete_shopping_list(&user.caller(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
