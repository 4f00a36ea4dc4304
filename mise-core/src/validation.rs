//! Input checks shared by recipe create and update.

use crate::error::StoreError;
use crate::types::{Category, RecipeFields, StructuredIngredient, UnknownCategory};

/// Recipe fields after trimming, category parsing and ingredient filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRecipe {
    pub name: String,
    pub ingredients: Vec<StructuredIngredient>,
    pub instructions: String,
    pub prep_time: i32,
    pub category: Category,
}

pub fn validate_recipe(fields: &RecipeFields) -> Result<ValidRecipe, StoreError> {
    let name = fields.name.trim();
    if name.is_empty() {
        return Err(StoreError::validation("Recipe name is required"));
    }

    let instructions = fields.instructions.trim();
    if instructions.is_empty() {
        return Err(StoreError::validation("Instructions are required"));
    }

    if fields.prep_time <= 0 {
        return Err(StoreError::validation("Prep time must be greater than 0"));
    }

    if fields.category.trim().is_empty() {
        return Err(StoreError::validation("Category is required"));
    }
    let category: Category = fields
        .category
        .parse()
        .map_err(|e: UnknownCategory| StoreError::validation(e.to_string()))?;

    let ingredients = clean_ingredients(&fields.ingredients);
    if ingredients.is_empty() {
        return Err(StoreError::validation(
            "At least one valid ingredient is required",
        ));
    }

    Ok(ValidRecipe {
        name: name.to_string(),
        ingredients,
        instructions: instructions.to_string(),
        prep_time: fields.prep_time,
        category,
    })
}

/// Drop invalid ingredients and trim the text of the rest.
/// Blank notes become `None`.
pub fn clean_ingredients(ingredients: &[StructuredIngredient]) -> Vec<StructuredIngredient> {
    ingredients
        .iter()
        .filter(|i| i.is_valid())
        .map(|i| StructuredIngredient {
            quantity: i.quantity,
            unit: i.unit.trim().to_string(),
            ingredient: i.ingredient.trim().to_string(),
            notes: i
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        })
        .collect()
}
