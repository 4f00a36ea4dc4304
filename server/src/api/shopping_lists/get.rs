use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use mise_core::{RecipeStore, ShoppingList, StructuredIngredient};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShoppingListResponse {
    pub id: Uuid,
    pub name: String,
    /// Source recipes, as requested at creation time
    pub recipe_ids: Vec<Uuid>,
    /// Merged ingredients, frozen at creation time
    pub ingredients: Vec<StructuredIngredient>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ShoppingList> for ShoppingListResponse {
    fn from(list: ShoppingList) -> Self {
        ShoppingListResponse {
            id: list.id,
            name: list.name,
            recipe_ids: list.recipe_ids,
            ingredients: list.ingredients,
            created_at: list.created_at,
            updated_at: list.updated_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/shopping-lists/{id}",
    tag = "shopping-lists",
    params(
        ("id" = Uuid, Path, description = "Shopping list ID")
    ),
    responses(
        (status = 200, description = "Shopping list", body = ShoppingListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Shopping list not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_shopping_list(
    user: AuthUser,
    State(store): State<RecipeStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<ShoppingListResponse>, ApiError> {
    let list = store.get_shopping_list(&user.caller(), id).await?;
    Ok(Json(list.into()))
}
