use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Caller, RecipeStore};
use crate::error::StoreError;
use crate::shopping::merge_ingredients;
use crate::types::{Recipe, ShoppingList, StructuredIngredient};

const SOURCE_RECIPES_INVALID: &str = "some recipes not found or unauthorized";

fn default_list_name(now: DateTime<Utc>) -> String {
    format!("Shopping List - {}", now.format("%Y-%m-%d"))
}

impl RecipeStore {
    /// Fetch every referenced recipe, in order, failing if any is missing
    /// or belongs to someone else.
    async fn source_recipes(
        &self,
        user_id: Uuid,
        recipe_ids: &[Uuid],
    ) -> Result<Vec<Recipe>, StoreError> {
        if recipe_ids.is_empty() {
            return Err(StoreError::validation("At least one recipe is required"));
        }

        let mut recipes = Vec::with_capacity(recipe_ids.len());
        for id in recipe_ids {
            match self.repo.get_recipe(*id).await? {
                Some(recipe) if recipe.user_id == user_id => recipes.push(recipe),
                _ => return Err(StoreError::validation(SOURCE_RECIPES_INVALID)),
            }
        }
        Ok(recipes)
    }

    /// Merge the given recipes into a new list and store it.
    ///
    /// The list is a snapshot: later edits to the recipes do not reach it.
    /// A blank name falls back to a dated default.
    pub async fn create_shopping_list(
        &self,
        caller: &Caller,
        name: &str,
        recipe_ids: &[Uuid],
    ) -> Result<Uuid, StoreError> {
        let user_id = caller.user_id()?;
        let recipes = self.source_recipes(user_id, recipe_ids).await?;
        let ingredients = merge_ingredients(&recipes)?;

        let now = Utc::now();
        let name = match name.trim() {
            "" => default_list_name(now),
            trimmed => trimmed.to_string(),
        };

        let list = ShoppingList {
            id: Uuid::new_v4(),
            user_id,
            name,
            recipe_ids: recipe_ids.to_vec(),
            ingredients,
            created_at: now,
            updated_at: now,
        };

        self.repo.insert_shopping_list(&list).await?;
        tracing::info!(
            list_id = %list.id,
            %user_id,
            recipes = recipe_ids.len(),
            items = list.ingredients.len(),
            "Created shopping list"
        );
        Ok(list.id)
    }

    /// What `create_shopping_list` would store, without storing it.
    pub async fn preview_shopping_list(
        &self,
        caller: &Caller,
        recipe_ids: &[Uuid],
    ) -> Result<Vec<StructuredIngredient>, StoreError> {
        let user_id = caller.user_id()?;
        let recipes = self.source_recipes(user_id, recipe_ids).await?;
        merge_ingredients(&recipes)
    }

    /// Newest first. Store failures yield an empty list.
    pub async fn list_shopping_lists(
        &self,
        caller: &Caller,
    ) -> Result<Vec<ShoppingList>, StoreError> {
        let user_id = caller.user_id()?;

        match self.repo.shopping_lists_for_user(user_id).await {
            Ok(mut lists) => {
                lists.retain(|l| l.user_id == user_id);
                lists.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                Ok(lists)
            }
            Err(e) => {
                tracing::warn!(%user_id, "Failed to load shopping lists, returning none: {}", e);
                Ok(Vec::new())
            }
        }
    }

    pub async fn get_shopping_list(
        &self,
        caller: &Caller,
        id: Uuid,
    ) -> Result<ShoppingList, StoreError> {
        let user_id = caller.user_id()?;
        match self.repo.get_shopping_list(id).await? {
            Some(list) if list.user_id == user_id => Ok(list),
            _ => Err(StoreError::NotFoundOrUnauthorized),
        }
    }

    pub async fn delete_shopping_list(&self, caller: &Caller, id: Uuid) -> Result<(), StoreError> {
        let user_id = caller.user_id()?;
        self.get_shopping_list(caller, id).await?;

        if !self.repo.delete_shopping_list(user_id, id).await? {
            return Err(StoreError::NotFoundOrUnauthorized);
        }
        Ok(())
    }

    /// Names of the list's source recipes that still exist, in list order.
    /// Unlike the listings, store failures are reported.
    pub async fn source_recipe_names(
        &self,
        caller: &Caller,
        list: &ShoppingList,
    ) -> Result<Vec<String>, StoreError> {
        let user_id = caller.user_id()?;
        let mut recipes = self.repo.recipes_for_user(user_id).await?;
        recipes.retain(|r| r.user_id == user_id);

        let mut seen: Vec<Uuid> = Vec::new();
        let mut names = Vec::new();
        for id in &list.recipe_ids {
            if seen.contains(id) {
                continue;
            }
            seen.push(*id);
            if let Some(recipe) = recipes.iter().find(|r| r.id == *id) {
                names.push(recipe.name.clone());
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_list_name_uses_date() {
        let now = Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 0).unwrap();
        assert_eq!(default_list_name(now), "Shopping List - 2025-01-31");
    }
}
