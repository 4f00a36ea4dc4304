//! Serving-size scaling. Produces a view; nothing here is persisted.

use serde::Serialize;

use crate::error::StoreError;
use crate::types::{Recipe, StructuredIngredient};

/// A recipe re-computed for a different number of servings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledRecipe {
    pub recipe: Recipe,
    pub original_servings: f64,
    pub target_servings: f64,
    pub scaling_factor: f64,
    pub ingredients: Vec<StructuredIngredient>,
    /// Minutes, after the square-root adjustment.
    pub prep_time: i64,
}

pub fn scaling_factor(original_servings: f64, target_servings: f64) -> Result<f64, StoreError> {
    if !original_servings.is_finite() || original_servings <= 0.0 {
        return Err(StoreError::validation(
            "Original servings must be greater than 0",
        ));
    }
    if !target_servings.is_finite() || target_servings <= 0.0 {
        return Err(StoreError::validation(
            "Target servings must be greater than 0",
        ));
    }
    let factor = target_servings / original_servings;
    if !factor.is_finite() || factor <= 0.0 {
        return Err(StoreError::validation("Scaling factor is out of range"));
    }
    Ok(factor)
}

pub fn scale_recipe(
    recipe: &Recipe,
    original_servings: f64,
    target_servings: f64,
) -> Result<ScaledRecipe, StoreError> {
    let factor = scaling_factor(original_servings, target_servings)?;

    let ingredients: Vec<StructuredIngredient> = recipe
        .ingredients
        .iter()
        .map(|i| scale_ingredient(i, factor))
        .collect();
    if let Some(i) = ingredients.iter().find(|i| !i.quantity.is_finite()) {
        return Err(StoreError::validation(format!(
            "Scaled quantity of {} is too large",
            i.ingredient
        )));
    }

    Ok(ScaledRecipe {
        recipe: recipe.clone(),
        original_servings,
        target_servings,
        scaling_factor: factor,
        ingredients,
        prep_time: scale_prep_time(recipe.prep_time, factor),
    })
}

pub fn scale_ingredient(ingredient: &StructuredIngredient, factor: f64) -> StructuredIngredient {
    StructuredIngredient {
        quantity: round_hundredths(ingredient.quantity * factor),
        ..ingredient.clone()
    }
}

/// Effort grows with the square root of yield, not linearly.
pub fn scale_prep_time(prep_time: i32, factor: f64) -> i64 {
    (f64::from(prep_time) * factor.sqrt()).round() as i64
}

/// Half-up at the second decimal for the positive values seen here.
/// Values too large to carry hundredths are returned unchanged.
pub fn round_hundredths(value: f64) -> f64 {
    let cents = value * 100.0;
    if cents.is_finite() {
        cents.round() / 100.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use chrono::Utc;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn recipe(prep_time: i32, ingredients: Vec<StructuredIngredient>) -> Recipe {
        let now = Utc::now();
        Recipe {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Bread".to_string(),
            ingredients,
            instructions: "Knead.".to_string(),
            prep_time,
            category: Category::Other,
            created_at: now,
            updated_at: now,
            is_favorite: false,
        }
    }

    #[test]
    fn test_scale_flour_by_one_and_a_half() {
        let scaled = scale_ingredient(&StructuredIngredient::new(2.0, "cup", "flour"), 1.5);
        assert_eq!(scaled, StructuredIngredient::new(3.0, "cup", "flour"));
    }

    #[test]
    fn test_prep_time_grows_sub_linearly() {
        let r = recipe(30, vec![StructuredIngredient::new(1.0, "cup", "water")]);
        let scaled = scale_recipe(&r, 2.0, 4.0).unwrap();
        assert_eq!(scaled.scaling_factor, 2.0);
        assert_eq!(scaled.prep_time, 42);
        assert_eq!(scaled.ingredients[0].quantity, 2.0);
    }

    #[test]
    fn test_quantities_round_to_hundredths() {
        let r = recipe(10, vec![StructuredIngredient::new(1.0, "cup", "milk")]);
        let scaled = scale_recipe(&r, 3.0, 1.0).unwrap();
        assert_eq!(scaled.ingredients[0].quantity, 0.33);

        let scaled = scale_recipe(&r, 3.0, 2.0).unwrap();
        assert_eq!(scaled.ingredients[0].quantity, 0.67);
    }

    #[test]
    fn test_extreme_ratio_rejected() {
        assert!(matches!(
            scaling_factor(1e-308, 1e308),
            Err(StoreError::Validation(ref m)) if m == "Scaling factor is out of range"
        ));
        assert!(matches!(
            scaling_factor(1e308, 1e-308),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_overflowing_scaled_quantity_rejected() {
        let r = recipe(10, vec![StructuredIngredient::new(1e308, "g", "salt")]);
        assert!(matches!(
            scale_recipe(&r, 1.0, 10.0),
            Err(StoreError::Validation(ref m)) if m == "Scaled quantity of salt is too large"
        ));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_hundredths(0.125), 0.13);
        assert_eq!(round_hundredths(2.0), 2.0);
        assert_eq!(round_hundredths(1e307), 1e307);
    }

    #[test]
    fn test_non_positive_servings_rejected() {
        let r = recipe(10, vec![StructuredIngredient::new(1.0, "cup", "milk")]);
        assert!(matches!(
            scale_recipe(&r, 0.0, 4.0),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            scale_recipe(&r, -2.0, 4.0),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            scale_recipe(&r, 2.0, 0.0),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_scaling_leaves_recipe_untouched() {
        let r = recipe(10, vec![StructuredIngredient::new(1.0, "cup", "milk")]);
        let scaled = scale_recipe(&r, 1.0, 5.0).unwrap();
        assert_eq!(scaled.recipe, r);
        assert_eq!(r.ingredients[0].quantity, 1.0);
    }

    proptest! {
        #[test]
        fn prop_identity_factor_is_noop(
            hundredths in prop::collection::vec(1u32..100_000, 1..10),
            prep_time in 1i32..1000,
            servings in 1u32..50,
        ) {
            let ingredients = hundredths
                .iter()
                .map(|h| StructuredIngredient::new(f64::from(*h) / 100.0, "g", "sugar"))
                .collect();
            let r = recipe(prep_time, ingredients);
            let s = f64::from(servings);
            let scaled = scale_recipe(&r, s, s).unwrap();

            prop_assert_eq!(scaled.prep_time, i64::from(prep_time));
            prop_assert_eq!(scaled.ingredients, r.ingredients);
        }
    }
}
