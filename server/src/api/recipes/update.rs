use super::create::RecipeRequest;
use super::get::RecipeResponse;
use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use mise_core::RecipeStore;
use uuid::Uuid;

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    user: AuthUser,
    State(store): State<RecipeStore>,
    Path(id): Path<Uuid>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let Json(request) = payload?;
    let recipe = store
        .update_recipe(&user.caller(), id, &request.into())
        .await?;
    Ok(Json(recipe.into()))
}
