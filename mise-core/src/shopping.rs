//! Ingredient merging for shopping lists.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::types::{Recipe, StructuredIngredient};

/// Two ingredient lines refer to the same shopping item when their
/// trimmed, lowercased name and unit agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeKey {
    pub ingredient: String,
    pub unit: String,
}

impl MergeKey {
    pub fn of(ingredient: &StructuredIngredient) -> Self {
        Self {
            ingredient: ingredient.ingredient.trim().to_lowercase(),
            unit: ingredient.unit.trim().to_lowercase(),
        }
    }
}

/// Merge the ingredients of `recipes`, in order, into one list.
///
/// Quantities under the same key are summed and notes joined with ", ".
/// Output keeps the order in which each key was first seen. Invalid
/// ingredients are skipped. A total that no longer fits in an `f64` is a
/// validation error.
pub fn merge_ingredients<'a, I>(recipes: I) -> Result<Vec<StructuredIngredient>, StoreError>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    merge_ingredient_lists(recipes.into_iter().map(|r| r.ingredients.as_slice()))
}

pub fn merge_ingredient_lists<'a, I>(lists: I) -> Result<Vec<StructuredIngredient>, StoreError>
where
    I: IntoIterator<Item = &'a [StructuredIngredient]>,
{
    let mut merged: Vec<StructuredIngredient> = Vec::new();
    let mut positions: HashMap<MergeKey, usize> = HashMap::new();

    for ingredient in lists.into_iter().flatten() {
        if !ingredient.is_valid() {
            continue;
        }

        let key = MergeKey::of(ingredient);
        match positions.get(&key) {
            Some(&index) => {
                let existing = &mut merged[index];
                let total = existing.quantity + ingredient.quantity;
                if !total.is_finite() {
                    return Err(StoreError::validation(format!(
                        "Total quantity of {} is too large",
                        existing.ingredient
                    )));
                }
                existing.quantity = total;
                existing.notes = join_notes(existing.notes.take(), ingredient.notes.as_deref());
            }
            None => {
                positions.insert(key, merged.len());
                merged.push(StructuredIngredient {
                    notes: join_notes(None, ingredient.notes.as_deref()),
                    ..ingredient.clone()
                });
            }
        }
    }

    Ok(merged)
}

fn join_notes(existing: Option<String>, next: Option<&str>) -> Option<String> {
    let next = next.filter(|n| !n.trim().is_empty());
    match (existing, next) {
        (Some(a), Some(b)) => Some(format!("{}, {}", a, b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b.to_string()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use chrono::Utc;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn recipe(ingredients: Vec<StructuredIngredient>) -> Recipe {
        let now = Utc::now();
        Recipe {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "r".to_string(),
            ingredients,
            instructions: "i".to_string(),
            prep_time: 5,
            category: Category::Other,
            created_at: now,
            updated_at: now,
            is_favorite: false,
        }
    }

    #[test]
    fn test_flour_merge() {
        let a = recipe(vec![StructuredIngredient::new(2.0, "cup", "flour")]);
        let b = recipe(vec![
            StructuredIngredient::new(1.0, "cup", "flour").with_notes("sifted")
        ]);

        let merged = merge_ingredients([&a, &b]).unwrap();
        assert_eq!(
            merged,
            vec![StructuredIngredient::new(3.0, "cup", "flour").with_notes("sifted")]
        );
    }

    #[test]
    fn test_key_ignores_case_and_whitespace() {
        let a = recipe(vec![StructuredIngredient::new(1.0, "Cup", "Flour")]);
        let b = recipe(vec![StructuredIngredient::new(1.5, " cup", "flour ")]);

        let merged = merge_ingredients([&a, &b]).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].quantity, 2.5);
        // First occurrence keeps its spelling
        assert_eq!(merged[0].ingredient, "Flour");
        assert_eq!(merged[0].unit, "Cup");
    }

    #[test]
    fn test_different_units_stay_separate() {
        let a = recipe(vec![
            StructuredIngredient::new(1.0, "cup", "milk"),
            StructuredIngredient::new(2.0, "tbsp", "milk"),
        ]);
        let merged = merge_ingredients([&a]).unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_delimiter_in_fields_does_not_collide() {
        let a = recipe(vec![
            StructuredIngredient::new(1.0, "b", "a-"),
            StructuredIngredient::new(1.0, "-b", "a"),
        ]);
        let merged = merge_ingredients([&a]).unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_notes_join_in_order() {
        let a = recipe(vec![
            StructuredIngredient::new(1.0, "whole", "onion").with_notes("diced"),
            StructuredIngredient::new(1.0, "whole", "onion"),
            StructuredIngredient::new(1.0, "whole", "onion").with_notes("sliced"),
        ]);
        let merged = merge_ingredients([&a]).unwrap();
        assert_eq!(merged[0].quantity, 3.0);
        assert_eq!(merged[0].notes.as_deref(), Some("diced, sliced"));
    }

    #[test]
    fn test_notes_absent_when_none_given() {
        let a = recipe(vec![StructuredIngredient::new(1.0, "whole", "egg")]);
        let b = recipe(vec![
            StructuredIngredient::new(2.0, "whole", "egg").with_notes(""),
        ]);
        let merged = merge_ingredients([&a, &b]).unwrap();
        assert_eq!(merged[0].notes, None);
    }

    #[test]
    fn test_first_seen_order_and_invalid_skipped() {
        let a = recipe(vec![
            StructuredIngredient::new(1.0, "tsp", "salt"),
            StructuredIngredient::new(0.0, "cup", "sugar"),
        ]);
        let b = recipe(vec![
            StructuredIngredient::new(2.0, "cup", "rice"),
            StructuredIngredient::new(1.0, "tsp", "salt"),
        ]);
        let empty = recipe(vec![]);

        let merged = merge_ingredients([&a, &empty, &b]).unwrap();
        let names: Vec<_> = merged.iter().map(|i| i.ingredient.as_str()).collect();
        assert_eq!(names, vec!["salt", "rice"]);
        assert_eq!(merged[0].quantity, 2.0);
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let a = recipe(vec![StructuredIngredient::new(1e308, "g", "salt")]);

        let result = merge_ingredients([&a, &a]);
        assert!(matches!(
            result,
            Err(StoreError::Validation(ref m)) if m == "Total quantity of salt is too large"
        ));
    }

    #[test]
    fn test_large_but_finite_total_accepted() {
        let a = recipe(vec![StructuredIngredient::new(1e307, "g", "salt")]);
        let merged = merge_ingredients([&a, &a]).unwrap();
        assert_eq!(merged[0].quantity, 2e307);
    }

    fn ingredient_strategy() -> impl Strategy<Value = StructuredIngredient> {
        (
            1u32..50,
            prop::sample::select(vec!["cup", "Cup", "tsp", "g"]),
            prop::sample::select(vec!["flour", "FLOUR", "salt", "egg"]),
        )
            .prop_map(|(q, unit, name)| StructuredIngredient::new(q as f64, unit, name))
    }

    proptest! {
        #[test]
        fn prop_merge_totals_ignore_recipe_order(
            a in prop::collection::vec(ingredient_strategy(), 0..8),
            b in prop::collection::vec(ingredient_strategy(), 0..8),
        ) {
            let ra = recipe(a);
            let rb = recipe(b);
            let totals = |merged: Vec<StructuredIngredient>| {
                let mut map: HashMap<MergeKey, f64> = HashMap::new();
                for i in &merged {
                    *map.entry(MergeKey::of(i)).or_default() += i.quantity;
                }
                map
            };

            let ab = totals(merge_ingredients([&ra, &rb]).unwrap());
            let ba = totals(merge_ingredients([&rb, &ra]).unwrap());
            prop_assert_eq!(ab, ba);
        }
    }
}
