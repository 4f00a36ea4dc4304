pub mod create;
pub mod delete;
pub mod favorite;
pub mod get;
pub mod list;
pub mod scale;
pub mod update;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route("/{id}/favorite", post(favorite::toggle_favorite))
        .route("/{id}/scaled", get(scale::scale_recipe))
        .route("/{id}/scaled/print", get(scale::print_scaled_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        favorite::toggle_favorite,
        scale::scale_recipe,
        scale::print_scaled_recipe,
    ),
    components(schemas(
        create::RecipeRequest,
        create::CreateRecipeResponse,
        list::ListRecipesResponse,
        get::RecipeResponse,
        favorite::FavoriteResponse,
        scale::ScaledRecipeResponse,
    ))
)]
pub struct ApiDoc;
