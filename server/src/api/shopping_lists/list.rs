use super::get::ShoppingListResponse;
use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use axum::{extract::State, Json};
use mise_core::RecipeStore;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListShoppingListsResponse {
    pub shopping_lists: Vec<ShoppingListResponse>,
}

#[utoipa::path(
    get,
    path = "/api/shopping-lists",
    tag = "shopping-lists",
    responses(
        (status = 200, description = "Caller's shopping lists, newest first", body = ListShoppingListsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_shopping_lists(
    user: AuthUser,
    State(store): State<RecipeStore>,
) -> Result<Json<ListShoppingListsResponse>, ApiError> {
    let lists = store.list_shopping_lists(&user.caller()).await?;

    Ok(Json(ListShoppingListsResponse {
        shopping_lists: lists.into_iter().map(ShoppingListResponse::from).collect(),
    }))
}
