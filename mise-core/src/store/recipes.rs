use chrono::Utc;
use uuid::Uuid;

use super::{Caller, RecipeStore};
use crate::error::StoreError;
use crate::scaling::{self, ScaledRecipe};
use crate::types::{Recipe, RecipeFields, RecipeFilter};
use crate::validation::validate_recipe;

impl RecipeStore {
    /// All of the caller's recipes, most recently updated first.
    ///
    /// A failing store yields an empty list rather than an error; only a
    /// missing identity is reported.
    pub async fn list_recipes(&self, caller: &Caller) -> Result<Vec<Recipe>, StoreError> {
        self.list_recipes_filtered(caller, &RecipeFilter::default())
            .await
    }

    pub async fn list_recipes_filtered(
        &self,
        caller: &Caller,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, StoreError> {
        let user_id = caller.user_id()?;

        let mut recipes = match self.repo.recipes_for_user(user_id).await {
            Ok(recipes) => recipes,
            Err(e) => {
                tracing::warn!(%user_id, "Failed to load recipes, returning none: {}", e);
                return Ok(Vec::new());
            }
        };

        recipes.retain(|r| r.user_id == user_id && filter.matches(r));
        recipes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(recipes)
    }

    pub async fn get_recipe(&self, caller: &Caller, id: Uuid) -> Result<Recipe, StoreError> {
        let user_id = caller.user_id()?;
        self.owned_recipe(user_id, id).await
    }

    pub async fn create_recipe(
        &self,
        caller: &Caller,
        fields: &RecipeFields,
    ) -> Result<Uuid, StoreError> {
        let user_id = caller.user_id()?;
        let valid = validate_recipe(fields)?;

        let now = Utc::now();
        let recipe = Recipe {
            id: Uuid::new_v4(),
            user_id,
            name: valid.name,
            ingredients: valid.ingredients,
            instructions: valid.instructions,
            prep_time: valid.prep_time,
            category: valid.category,
            created_at: now,
            updated_at: now,
            is_favorite: false,
        };

        self.repo.insert_recipe(&recipe).await?;
        tracing::info!(recipe_id = %recipe.id, %user_id, "Created recipe");
        Ok(recipe.id)
    }

    /// Replace the editable fields. Creation time and favorite flag are kept.
    pub async fn update_recipe(
        &self,
        caller: &Caller,
        id: Uuid,
        fields: &RecipeFields,
    ) -> Result<Recipe, StoreError> {
        let user_id = caller.user_id()?;
        let existing = self.owned_recipe(user_id, id).await?;
        let valid = validate_recipe(fields)?;

        let recipe = Recipe {
            name: valid.name,
            ingredients: valid.ingredients,
            instructions: valid.instructions,
            prep_time: valid.prep_time,
            category: valid.category,
            updated_at: Utc::now(),
            ..existing
        };

        if !self.repo.update_recipe(&recipe).await? {
            return Err(StoreError::NotFoundOrUnauthorized);
        }
        Ok(recipe)
    }

    /// Returns the new favorite state.
    pub async fn toggle_favorite(&self, caller: &Caller, id: Uuid) -> Result<bool, StoreError> {
        let user_id = caller.user_id()?;
        let existing = self.owned_recipe(user_id, id).await?;

        let recipe = Recipe {
            is_favorite: !existing.is_favorite,
            updated_at: Utc::now(),
            ..existing
        };

        if !self.repo.update_recipe(&recipe).await? {
            return Err(StoreError::NotFoundOrUnauthorized);
        }
        Ok(recipe.is_favorite)
    }

    /// Shopping lists built from this recipe keep their snapshot.
    pub async fn remove_recipe(&self, caller: &Caller, id: Uuid) -> Result<(), StoreError> {
        let user_id = caller.user_id()?;
        self.owned_recipe(user_id, id).await?;

        if !self.repo.delete_recipe(user_id, id).await? {
            return Err(StoreError::NotFoundOrUnauthorized);
        }
        tracing::info!(recipe_id = %id, %user_id, "Deleted recipe");
        Ok(())
    }

    pub async fn scale_recipe(
        &self,
        caller: &Caller,
        id: Uuid,
        original_servings: f64,
        target_servings: f64,
    ) -> Result<ScaledRecipe, StoreError> {
        let recipe = self.get_recipe(caller, id).await?;
        scaling::scale_recipe(&recipe, original_servings, target_servings)
    }
}
