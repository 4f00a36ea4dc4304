use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// One line of a recipe or shopping list: "2 cup flour (sifted)".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StructuredIngredient {
    /// Must be greater than 0
    pub quantity: f64,
    pub unit: String,
    pub ingredient: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StructuredIngredient {
    pub fn new(quantity: f64, unit: &str, ingredient: &str) -> Self {
        Self {
            quantity,
            unit: unit.to_string(),
            ingredient: ingredient.to_string(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// Positive finite quantity, non-blank unit and non-blank name.
    pub fn is_valid(&self) -> bool {
        self.quantity.is_finite()
            && self.quantity > 0.0
            && !self.unit.trim().is_empty()
            && !self.ingredient.trim().is_empty()
    }
}

/// Recipe categories offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
    Appetizer,
    Snack,
    Dessert,
    Drink,
    #[serde(rename = "Side Dish")]
    SideDish,
    Soup,
    Salad,
    Other,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::Breakfast,
        Category::Lunch,
        Category::Dinner,
        Category::Appetizer,
        Category::Snack,
        Category::Dessert,
        Category::Drink,
        Category::SideDish,
        Category::Soup,
        Category::Salad,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Breakfast => "Breakfast",
            Category::Lunch => "Lunch",
            Category::Dinner => "Dinner",
            Category::Appetizer => "Appetizer",
            Category::Snack => "Snack",
            Category::Dessert => "Dessert",
            Category::Drink => "Drink",
            Category::SideDish => "Side Dish",
            Category::Soup => "Soup",
            Category::Salad => "Salad",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive, ignores surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(wanted.to_string()))
    }
}

/// A stored recipe, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub ingredients: Vec<StructuredIngredient>,
    pub instructions: String,
    /// Minutes.
    pub prep_time: i32,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_favorite: bool,
}

/// User-editable recipe fields, as submitted for create and update.
///
/// Category stays a string here so unknown values surface as validation
/// errors instead of deserialization failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeFields {
    pub name: String,
    pub ingredients: Vec<StructuredIngredient>,
    pub instructions: String,
    pub prep_time: i32,
    pub category: String,
}

/// A frozen snapshot of merged ingredients from several recipes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub recipe_ids: Vec<Uuid>,
    pub ingredients: Vec<StructuredIngredient>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional narrowing for recipe listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    /// Case-insensitive match against name, category and ingredient names.
    pub search: Option<String>,
    pub category: Option<Category>,
    pub favorites_only: bool,
}

impl RecipeFilter {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if self.favorites_only && !recipe.is_favorite {
            return false;
        }
        if let Some(category) = self.category {
            if recipe.category != category {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                recipe.name.to_lowercase().contains(&term)
                    || recipe.category.as_str().to_lowercase().contains(&term)
                    || recipe
                        .ingredients
                        .iter()
                        .any(|i| i.ingredient.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }
}
