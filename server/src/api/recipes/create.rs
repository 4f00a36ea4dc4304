use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use mise_core::{RecipeFields, RecipeStore, StructuredIngredient};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Body for both create and update.
///
/// Missing fields fall back to empty values so validation reports them.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RecipeRequest {
    pub name: String,
    /// Lines with a non-positive quantity or a blank unit or name are dropped
    pub ingredients: Vec<StructuredIngredient>,
    pub instructions: String,
    /// Minutes, must be greater than 0
    pub prep_time: i32,
    #[schema(example = "Dinner")]
    pub category: String,
}

impl From<RecipeRequest> for RecipeFields {
    fn from(request: RecipeRequest) -> Self {
        RecipeFields {
            name: request.name,
            ingredients: request.ingredients,
            instructions: request.instructions,
            prep_time: request.prep_time,
            category: request.category,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = CreateRecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    user: AuthUser,
    State(store): State<RecipeStore>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateRecipeResponse>), ApiError> {
    let Json(request) = payload?;
    let id = store.create_recipe(&user.caller(), &request.into()).await?;
    Ok((StatusCode::CREATED, Json(CreateRecipeResponse { id })))
}
