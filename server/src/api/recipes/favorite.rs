use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use axum::{
    extract::{Path, State},
    Json,
};
use mise_core::RecipeStore;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FavoriteResponse {
    pub is_favorite: bool,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/favorite",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Favorite flag flipped", body = FavoriteResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn toggle_favorite(
    user: AuthUser,
    State(store): State<RecipeStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<FavoriteResponse>, ApiError> {
    let is_favorite = store.toggle_favorite(&user.caller(), id).await?;
    Ok(Json(FavoriteResponse { is_favorite }))
}
