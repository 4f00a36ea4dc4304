pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod preview;
pub mod print;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/shopping-lists endpoints (mounted at /api/shopping-lists)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list::list_shopping_lists).post(create::create_shopping_list),
        )
        .route("/preview", post(preview::preview_shopping_list))
        .route(
            "/{id}",
            get(get::get_shopping_list).delete(delete::delete_shopping_list),
        )
        .route("/{id}/print", get(print::print_shopping_list))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_shopping_lists,
        create::create_shopping_list,
        preview::preview_shopping_list,
        get::get_shopping_list,
        delete::delete_shopping_list,
        print::print_shopping_list,
    ),
    components(schemas(
        list::ListShoppingListsResponse,
        get::ShoppingListResponse,
        create::CreateShoppingListRequest,
        create::CreateShoppingListResponse,
        preview::PreviewShoppingListRequest,
        preview::PreviewShoppingListResponse,
    ))
)]
pub struct ApiDoc;
