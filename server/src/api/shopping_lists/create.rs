use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use mise_core::RecipeStore;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateShoppingListRequest {
    /// Defaults to "Shopping List - YYYY-MM-DD" when blank or missing
    pub name: Option<String>,
    /// Recipes to merge; repeating an id counts its ingredients again
    pub recipe_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateShoppingListResponse {
    pub id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/shopping-lists",
    tag = "shopping-lists",
    request_body = CreateShoppingListRequest,
    responses(
        (status = 201, description = "Shopping list created", body = CreateShoppingListResponse),
        (status = 400, description = "No recipes, or some recipes not found or unauthorized", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_shopping_list(
    user: AuthUser,
    State(store): State<RecipeStore>,
    payload: Result<Json<CreateShoppingListRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateShoppingListResponse>), ApiError> {
    let Json(request) = payload?;
    let id = store
        .create_shopping_list(
            &user.caller(),
            request.name.as_deref().unwrap_or_default(),
            &request.recipe_ids,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CreateShoppingListResponse { id })))
}
