use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use mise_core::{RecipeStore, StructuredIngredient};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct PreviewShoppingListRequest {
    pub recipe_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PreviewShoppingListResponse {
    pub ingredients: Vec<StructuredIngredient>,
}

/// Merge without saving.
#[utoipa::path(
    post,
    path = "/api/shopping-lists/preview",
    tag = "shopping-lists",
    request_body = PreviewShoppingListRequest,
    responses(
        (status = 200, description = "Merged ingredients", body = PreviewShoppingListResponse),
        (status = 400, description = "No recipes, or some recipes not found or unauthorized", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn preview_shopping_list(
    user: AuthUser,
    State(store): State<RecipeStore>,
    payload: Result<Json<PreviewShoppingListRequest>, JsonRejection>,
) -> Result<Json<PreviewShoppingListResponse>, ApiError> {
    let Json(request) = payload?;
    let ingredients = store
        .preview_shopping_list(&user.caller(), &request.recipe_ids)
        .await?;

    Ok(Json(PreviewShoppingListResponse { ingredients }))
}
