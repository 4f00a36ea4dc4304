use super::get::RecipeResponse;
use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use axum::{
    extract::{Query, State},
    Json,
};
use mise_core::{Category, RecipeFilter, RecipeStore, StoreError};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRecipesParams {
    /// Case-insensitive text matched against name, category and ingredients
    pub q: Option<String>,
    /// Only recipes in this category, e.g. "Dinner" or "Side Dish"
    pub category: Option<String>,
    /// Only favorites when true
    pub favorites: Option<bool>,
}

impl ListRecipesParams {
    fn into_filter(self) -> Result<RecipeFilter, StoreError> {
        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(name) => Some(
                name.parse::<Category>()
                    .map_err(|e| StoreError::validation(e.to_string()))?,
            ),
        };

        Ok(RecipeFilter {
            search: self
                .q
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
            category,
            favorites_only: self.favorites.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeResponse>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Caller's recipes, most recently updated first", body = ListRecipesResponse),
        (status = 400, description = "Unknown category", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_recipes(
    user: AuthUser,
    State(store): State<RecipeStore>,
    Query(params): Query<ListRecipesParams>,
) -> Result<Json<ListRecipesResponse>, ApiError> {
    let filter = params.into_filter()?;
    let recipes = store.list_recipes_filtered(&user.caller(), &filter).await?;

    Ok(Json(ListRecipesResponse {
        recipes: recipes.into_iter().map(RecipeResponse::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_match_everything() {
        let filter = ListRecipesParams::default().into_filter().unwrap();
        assert_eq!(filter, RecipeFilter::default());
    }

    #[test]
    fn test_params_become_filter() {
        let params = ListRecipesParams {
            q: Some("  soup ".to_string()),
            category: Some("side dish".to_string()),
            favorites: Some(true),
        };

        let filter = params.into_filter().unwrap();
        assert_eq!(filter.search.as_deref(), Some("soup"));
        assert_eq!(filter.category, Some(Category::SideDish));
        assert!(filter.favorites_only);
    }

    #[test]
    fn test_blank_query_and_category_ignored() {
        let params = ListRecipesParams {
            q: Some("   ".to_string()),
            category: Some("".to_string()),
            favorites: None,
        };
        assert_eq!(params.into_filter().unwrap(), RecipeFilter::default());
    }

    #[test]
    fn test_unknown_category_is_validation_error() {
        let params = ListRecipesParams {
            category: Some("Brunch".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            params.into_filter(),
            Err(StoreError::Validation(_))
        ));
    }
}
