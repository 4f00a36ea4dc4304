use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use mise_core::{Recipe, RecipeStore, StructuredIngredient};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub name: String,
    pub ingredients: Vec<StructuredIngredient>,
    pub instructions: String,
    /// Minutes
    pub prep_time: i32,
    #[schema(example = "Dinner")]
    pub category: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        RecipeResponse {
            id: recipe.id,
            name: recipe.name,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            prep_time: recipe.prep_time,
            category: recipe.category.to_string(),
            is_favorite: recipe.is_favorite,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_recipe(
    user: AuthUser,
    State(store): State<RecipeStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let recipe = store.get_recipe(&user.caller(), id).await?;
    Ok(Json(recipe.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mise_core::Category;

    #[test]
    fn test_response_uses_display_category() {
        let now = Utc::now();
        let recipe = Recipe {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Greens".to_string(),
            ingredients: vec![StructuredIngredient::new(1.0, "bunch", "kale")],
            instructions: "Wilt.".to_string(),
            prep_time: 5,
            category: Category::SideDish,
            created_at: now,
            updated_at: now,
            is_favorite: true,
        };

        let response = RecipeResponse::from(recipe);
        assert_eq!(response.category, "Side Dish");
        assert_eq!(response.ingredients[0].ingredient, "kale");
        assert!(response.is_favorite);
    }
}
