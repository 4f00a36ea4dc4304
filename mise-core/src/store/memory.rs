//! In-process repository for tests and local experiments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use uuid::Uuid;

use super::RecipeRepository;
use crate::error::RepositoryError;
use crate::types::{Recipe, ShoppingList};

/// Keeps documents in hash maps behind a lock.
///
/// `set_failing(true)` makes every call return
/// [`RepositoryError::Unavailable`], for exercising error paths.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    recipes: RwLock<HashMap<Uuid, Recipe>>,
    shopping_lists: RwLock<HashMap<Uuid, ShoppingList>>,
    failing: AtomicBool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn shopping_list_count(&self) -> usize {
        self.shopping_lists.read().map(|l| l.len()).unwrap_or(0)
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "memory repository set to fail".to_string(),
            ));
        }
        Ok(())
    }
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("lock poisoned".to_string())
}

#[async_trait]
impl RecipeRepository for MemoryRepository {
    async fn recipes_for_user(&self, user_id: Uuid) -> Result<Vec<Recipe>, RepositoryError> {
        self.check()?;
        let recipes = self.recipes.read().map_err(poisoned)?;
        Ok(recipes
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>, RepositoryError> {
        self.check()?;
        let recipes = self.recipes.read().map_err(poisoned)?;
        Ok(recipes.get(&id).cloned())
    }

    async fn insert_recipe(&self, recipe: &Recipe) -> Result<(), RepositoryError> {
        self.check()?;
        let mut recipes = self.recipes.write().map_err(poisoned)?;
        recipes.insert(recipe.id, recipe.clone());
        Ok(())
    }

    async fn update_recipe(&self, recipe: &Recipe) -> Result<bool, RepositoryError> {
        self.check()?;
        let mut recipes = self.recipes.write().map_err(poisoned)?;
        match recipes.get_mut(&recipe.id) {
            Some(existing) if existing.user_id == recipe.user_id => {
                *existing = recipe.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_recipe(&self, user_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        self.check()?;
        let mut recipes = self.recipes.write().map_err(poisoned)?;
        if recipes.get(&id).is_some_and(|r| r.user_id == user_id) {
            recipes.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn shopping_lists_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ShoppingList>, RepositoryError> {
        self.check()?;
        let lists = self.shopping_lists.read().map_err(poisoned)?;
        let mut lists: Vec<ShoppingList> = lists
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        lists.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(lists)
    }

    async fn get_shopping_list(&self, id: Uuid) -> Result<Option<ShoppingList>, RepositoryError> {
        self.check()?;
        let lists = self.shopping_lists.read().map_err(poisoned)?;
        Ok(lists.get(&id).cloned())
    }

    async fn insert_shopping_list(&self, list: &ShoppingList) -> Result<(), RepositoryError> {
        self.check()?;
        let mut lists = self.shopping_lists.write().map_err(poisoned)?;
        lists.insert(list.id, list.clone());
        Ok(())
    }

    async fn delete_shopping_list(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<bool, RepositoryError> {
        self.check()?;
        let mut lists = self.shopping_lists.write().map_err(poisoned)?;
        if lists.get(&id).is_some_and(|l| l.user_id == user_id) {
            lists.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}
