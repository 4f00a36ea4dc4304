pub mod error;
pub mod print;
pub mod scaling;
pub mod shopping;
pub mod store;
pub mod types;
pub mod validation;

pub use error::{RepositoryError, StoreError};
pub use print::{
    format_ingredient, format_quantity, render_scaled_recipe_html, render_shopping_list_html,
};
pub use scaling::{scale_recipe, ScaledRecipe};
pub use shopping::{merge_ingredients, MergeKey};
pub use store::{Caller, MemoryRepository, RecipeRepository, RecipeStore};
pub use types::{
    Category, Recipe, RecipeFields, RecipeFilter, ShoppingList, StructuredIngredient,
};
