use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use axum::{
    extract::{Path, State},
    response::Html,
};
use mise_core::{render_shopping_list_html, RecipeStore};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/shopping-lists/{id}/print",
    tag = "shopping-lists",
    params(
        ("id" = Uuid, Path, description = "Shopping list ID")
    ),
    responses(
        (status = 200, description = "Printable HTML page", content_type = "text/html", body = String),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Shopping list not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn print_shopping_list(
    user: AuthUser,
    State(store): State<RecipeStore>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, ApiError> {
    let caller = user.caller();
    let list = store.get_shopping_list(&caller, id).await?;
    let recipe_names = store.source_recipe_names(&caller, &list).await?;

    Ok(Html(render_shopping_list_html(&list, &recipe_names)))
}
