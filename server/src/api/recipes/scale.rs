use super::get::RecipeResponse;
use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use mise_core::{render_scaled_recipe_html, RecipeStore, ScaledRecipe, StructuredIngredient};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

fn default_original() -> f64 {
    2.0
}

fn default_target() -> f64 {
    4.0
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScaleParams {
    /// Servings the stored quantities are written for (default: 2)
    #[serde(default = "default_original")]
    #[param(default = 2.0)]
    pub original: f64,
    /// Servings to scale to (default: 4)
    #[serde(default = "default_target")]
    #[param(default = 4.0)]
    pub target: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScaledRecipeResponse {
    pub recipe: RecipeResponse,
    pub original_servings: f64,
    pub target_servings: f64,
    pub scaling_factor: f64,
    /// Quantities rounded to two decimals
    pub ingredients: Vec<StructuredIngredient>,
    /// Minutes, grows with the square root of the scaling factor
    pub prep_time: i64,
}

impl From<ScaledRecipe> for ScaledRecipeResponse {
    fn from(scaled: ScaledRecipe) -> Self {
        ScaledRecipeResponse {
            recipe: scaled.recipe.into(),
            original_servings: scaled.original_servings,
            target_servings: scaled.target_servings,
            scaling_factor: scaled.scaling_factor,
            ingredients: scaled.ingredients,
            prep_time: scaled.prep_time,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/scaled",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID"),
        ScaleParams
    ),
    responses(
        (status = 200, description = "Recipe scaled to the target servings", body = ScaledRecipeResponse),
        (status = 400, description = "Servings must be greater than 0", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn scale_recipe(
    user: AuthUser,
    State(store): State<RecipeStore>,
    Path(id): Path<Uuid>,
    Query(params): Query<ScaleParams>,
) -> Result<Json<ScaledRecipeResponse>, ApiError> {
    let scaled = store
        .scale_recipe(&user.caller(), id, params.original, params.target)
        .await?;
    Ok(Json(scaled.into()))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/scaled/print",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID"),
        ScaleParams
    ),
    responses(
        (status = 200, description = "Printable HTML page", content_type = "text/html", body = String),
        (status = 400, description = "Servings must be greater than 0", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn print_scaled_recipe(
    user: AuthUser,
    State(store): State<RecipeStore>,
    Path(id): Path<Uuid>,
    Query(params): Query<ScaleParams>,
) -> Result<Html<String>, ApiError> {
    let scaled = store
        .scale_recipe(&user.caller(), id, params.original, params.target)
        .await?;
    Ok(Html(render_scaled_recipe_html(&scaled)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    fn params(uri: &str) -> ScaleParams {
        let uri: Uri = uri.parse().unwrap();
        Query::<ScaleParams>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn test_defaults_double_two_servings() {
        let p = params("/api/recipes/x/scaled");
        assert_eq!(p.original, 2.0);
        assert_eq!(p.target, 4.0);
    }

    #[test]
    fn test_explicit_servings() {
        let p = params("/api/recipes/x/scaled?original=4&target=1.5");
        assert_eq!(p.original, 4.0);
        assert_eq!(p.target, 1.5);
    }
}
