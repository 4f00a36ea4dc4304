//! Ownership-checked recipe and shopping list operations.
//!
//! Persistence is reached only through [`RecipeRepository`], and the caller's
//! identity only through [`Caller`]. Both are passed in explicitly so the
//! operations can run against Postgres in the server and against
//! [`MemoryRepository`] in tests.

mod memory;
mod recipes;
mod shopping_lists;

pub use memory::MemoryRepository;

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{RepositoryError, StoreError};
use crate::types::{Recipe, ShoppingList};

/// Identity of whoever is invoking an operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caller {
    user_id: Option<Uuid>,
}

impl Caller {
    pub fn authenticated(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user_id(&self) -> Result<Uuid, StoreError> {
        self.user_id.ok_or(StoreError::Authentication)
    }
}

/// Document store holding recipes and shopping lists.
///
/// Lookups by id are unfiltered; owner checks happen in [`RecipeStore`].
/// Writes take the owner as well so a record that changed hands or vanished
/// between read and write is reported as not updated.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn recipes_for_user(&self, user_id: Uuid) -> Result<Vec<Recipe>, RepositoryError>;

    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>, RepositoryError>;

    async fn insert_recipe(&self, recipe: &Recipe) -> Result<(), RepositoryError>;

    /// Replace the stored document with the same id and owner.
    /// Returns false if no such document exists.
    async fn update_recipe(&self, recipe: &Recipe) -> Result<bool, RepositoryError>;

    async fn delete_recipe(&self, user_id: Uuid, id: Uuid) -> Result<bool, RepositoryError>;

    /// Newest first.
    async fn shopping_lists_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ShoppingList>, RepositoryError>;

    async fn get_shopping_list(&self, id: Uuid) -> Result<Option<ShoppingList>, RepositoryError>;

    async fn insert_shopping_list(&self, list: &ShoppingList) -> Result<(), RepositoryError>;

    async fn delete_shopping_list(&self, user_id: Uuid, id: Uuid)
        -> Result<bool, RepositoryError>;
}

/// Entry point for every recipe and shopping list operation.
#[derive(Clone)]
pub struct RecipeStore {
    repo: Arc<dyn RecipeRepository>,
}

impl RecipeStore {
    pub fn new(repo: Arc<dyn RecipeRepository>) -> Self {
        Self { repo }
    }

    /// Load a recipe the caller owns. Absent and foreign look the same.
    async fn owned_recipe(&self, user_id: Uuid, id: Uuid) -> Result<Recipe, StoreError> {
        match self.repo.get_recipe(id).await? {
            Some(recipe) if recipe.user_id == user_id => Ok(recipe),
            _ => Err(StoreError::NotFoundOrUnauthorized),
        }
    }
}
