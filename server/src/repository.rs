//! Postgres-backed document store for recipes and shopping lists.

use async_trait::async_trait;
use diesel::prelude::*;
use mise_core::{Recipe, RecipeRepository, RepositoryError, ShoppingList, StructuredIngredient};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::{NewRecipe, NewShoppingList, RecipeRow, ShoppingListRow};
use crate::schema::{recipes, shopping_lists};

pub struct PgRepository {
    pool: Arc<DbPool>,
}

impl PgRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn conn(
        &self,
    ) -> Result<
        diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>,
        RepositoryError,
    > {
        self.pool
            .get()
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))
    }
}

fn query_error(e: diesel::result::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

fn ingredients_to_json(
    ingredients: &[StructuredIngredient],
) -> Result<serde_json::Value, RepositoryError> {
    serde_json::to_value(ingredients).map_err(|e| RepositoryError::Corrupt(e.to_string()))
}

fn ingredients_from_json(
    value: serde_json::Value,
) -> Result<Vec<StructuredIngredient>, RepositoryError> {
    serde_json::from_value(value).map_err(|e| RepositoryError::Corrupt(e.to_string()))
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = RepositoryError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse()
            .map_err(|e: mise_core::types::UnknownCategory| {
                RepositoryError::Corrupt(format!("recipe {}: {}", row.id, e))
            })?;

        Ok(Recipe {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            ingredients: ingredients_from_json(row.ingredients)?,
            instructions: row.instructions,
            prep_time: row.prep_time,
            category,
            created_at: row.created_at,
            updated_at: row.updated_at,
            is_favorite: row.is_favorite.unwrap_or(false),
        })
    }
}

impl TryFrom<ShoppingListRow> for ShoppingList {
    type Error = RepositoryError;

    fn try_from(row: ShoppingListRow) -> Result<Self, Self::Error> {
        Ok(ShoppingList {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            recipe_ids: row.recipe_ids.into_iter().flatten().collect(),
            ingredients: ingredients_from_json(row.ingredients)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl RecipeRepository for PgRepository {
    async fn recipes_for_user(&self, user_id: Uuid) -> Result<Vec<Recipe>, RepositoryError> {
        let mut conn = self.conn()?;

        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::user_id.eq(user_id))
            .order(recipes::updated_at.desc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .map_err(query_error)?;

        rows.into_iter().map(Recipe::try_from).collect()
    }

    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>, RepositoryError> {
        let mut conn = self.conn()?;

        let row: Option<RecipeRow> = recipes::table
            .find(id)
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(query_error)?;

        row.map(Recipe::try_from).transpose()
    }

    async fn insert_recipe(&self, recipe: &Recipe) -> Result<(), RepositoryError> {
        let mut conn = self.conn()?;

        let new_recipe = NewRecipe {
            id: recipe.id,
            user_id: recipe.user_id,
            name: &recipe.name,
            ingredients: ingredients_to_json(&recipe.ingredients)?,
            instructions: &recipe.instructions,
            prep_time: recipe.prep_time,
            category: recipe.category.as_str(),
            is_favorite: Some(recipe.is_favorite),
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        };

        diesel::insert_into(recipes::table)
            .values(&new_recipe)
            .execute(&mut conn)
            .map_err(query_error)?;
        Ok(())
    }

    async fn update_recipe(&self, recipe: &Recipe) -> Result<bool, RepositoryError> {
        let mut conn = self.conn()?;
        let ingredients = ingredients_to_json(&recipe.ingredients)?;

        let updated = diesel::update(
            recipes::table
                .filter(recipes::id.eq(recipe.id))
                .filter(recipes::user_id.eq(recipe.user_id)),
        )
        .set((
            recipes::name.eq(&recipe.name),
            recipes::ingredients.eq(ingredients),
            recipes::instructions.eq(&recipe.instructions),
            recipes::prep_time.eq(recipe.prep_time),
            recipes::category.eq(recipe.category.as_str()),
            recipes::is_favorite.eq(Some(recipe.is_favorite)),
            recipes::updated_at.eq(recipe.updated_at),
        ))
        .execute(&mut conn)
        .map_err(query_error)?;

        Ok(updated > 0)
    }

    async fn delete_recipe(&self, user_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            recipes::table
                .filter(recipes::id.eq(id))
                .filter(recipes::user_id.eq(user_id)),
        )
        .execute(&mut conn)
        .map_err(query_error)?;

        Ok(deleted > 0)
    }

    async fn shopping_lists_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ShoppingList>, RepositoryError> {
        let mut conn = self.conn()?;

        let rows: Vec<ShoppingListRow> = shopping_lists::table
            .filter(shopping_lists::user_id.eq(user_id))
            .order(shopping_lists::created_at.desc())
            .select(ShoppingListRow::as_select())
            .load(&mut conn)
            .map_err(query_error)?;

        rows.into_iter().map(ShoppingList::try_from).collect()
    }

    async fn get_shopping_list(&self, id: Uuid) -> Result<Option<ShoppingList>, RepositoryError> {
        let mut conn = self.conn()?;

        let row: Option<ShoppingListRow> = shopping_lists::table
            .find(id)
            .select(ShoppingListRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(query_error)?;

        row.map(ShoppingList::try_from).transpose()
    }

    async fn insert_shopping_list(&self, list: &ShoppingList) -> Result<(), RepositoryError> {
        let mut conn = self.conn()?;
        let recipe_ids: Vec<Option<Uuid>> = list.recipe_ids.iter().copied().map(Some).collect();

        let new_list = NewShoppingList {
            id: list.id,
            user_id: list.user_id,
            name: &list.name,
            recipe_ids: &recipe_ids,
            ingredients: ingredients_to_json(&list.ingredients)?,
            created_at: list.created_at,
            updated_at: list.updated_at,
        };

        diesel::insert_into(shopping_lists::table)
            .values(&new_list)
            .execute(&mut conn)
            .map_err(query_error)?;
        Ok(())
    }

    async fn delete_shopping_list(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<bool, RepositoryError> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            shopping_lists::table
                .filter(shopping_lists::id.eq(id))
                .filter(shopping_lists::user_id.eq(user_id)),
        )
        .execute(&mut conn)
        .map_err(query_error)?;

        Ok(deleted > 0)
    }
}
