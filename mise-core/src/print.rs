//! Printable renderings of scaled recipes and shopping lists.

use std::fmt::Write;

use crate::scaling::{round_hundredths, ScaledRecipe};
use crate::types::{ShoppingList, StructuredIngredient};

const FRACTIONS: &[(i64, &str)] = &[
    (25, "1/4"),
    (33, "1/3"),
    (50, "1/2"),
    (67, "2/3"),
    (75, "3/4"),
];

/// Render a quantity for people: "2", "1 1/2", "1/3", "0.13".
pub fn format_quantity(quantity: f64) -> String {
    let quantity = round_hundredths(quantity);
    let whole = quantity.floor();
    let hundredths = ((quantity - whole) * 100.0).round() as i64;

    if hundredths == 0 || hundredths == 100 {
        return format!("{}", (whole as i64) + hundredths / 100);
    }

    if let Some((_, fraction)) = FRACTIONS.iter().find(|(h, _)| *h == hundredths) {
        return if whole > 0.0 {
            format!("{} {}", whole as i64, fraction)
        } else {
            fraction.to_string()
        };
    }

    let fixed = format!("{:.2}", quantity);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn format_ingredient(ingredient: &StructuredIngredient) -> String {
    let mut line = format!(
        "{} {} {}",
        format_quantity(ingredient.quantity),
        ingredient.unit,
        ingredient.ingredient
    );
    if let Some(notes) = ingredient.notes.as_deref().filter(|n| !n.is_empty()) {
        let _ = write!(line, " ({})", notes);
    }
    line
}

pub fn render_scaled_recipe_html(scaled: &ScaledRecipe) -> String {
    let recipe = &scaled.recipe;
    let name = escape_html(&recipe.name);
    let target = format_quantity(scaled.target_servings);

    let mut html = String::new();
    let _ = write!(
        html,
        "<html>\n<head>\n<title>{name} (Scaled for {target} servings)</title>\n\
         <style>\n\
         body {{ font-family: Arial, sans-serif; margin: 20px; line-height: 1.6; }}\n\
         h1 {{ color: #333; border-bottom: 2px solid #333; padding-bottom: 10px; }}\n\
         h2 {{ color: #666; margin-top: 25px; }}\n\
         .ingredient {{ margin: 4px 0; padding: 4px 0; }}\n\
         .scaling-info {{ background: #f0f8ff; padding: 10px; border-radius: 4px; margin-bottom: 20px; }}\n\
         @media print {{ body {{ margin: 0; }} }}\n\
         </style>\n</head>\n<body>\n<h1>{name}</h1>\n"
    );
    let _ = write!(
        html,
        "<div class=\"scaling-info\">\n\
         <strong>Scaled Recipe:</strong> {target} servings (from {original} servings)<br/>\n\
         <strong>Prep Time:</strong> {prep} minutes<br/>\n\
         <strong>Category:</strong> {category}\n</div>\n",
        original = format_quantity(scaled.original_servings),
        prep = scaled.prep_time,
        category = escape_html(recipe.category.as_str()),
    );

    let _ = writeln!(
        html,
        "<h2>Ingredients ({} items)</h2>",
        scaled.ingredients.len()
    );
    for ingredient in &scaled.ingredients {
        let _ = writeln!(
            html,
            "<div class=\"ingredient\">\u{2022} {}</div>",
            escape_html(&format_ingredient(ingredient))
        );
    }

    let _ = writeln!(
        html,
        "<h2>Instructions</h2>\n<p>{}</p>",
        escape_html(&recipe.instructions).replace('\n', "<br>")
    );
    html.push_str("</body>\n</html>\n");
    html
}

/// `recipe_names` are the names of the source recipes still visible to the owner.
pub fn render_shopping_list_html(list: &ShoppingList, recipe_names: &[String]) -> String {
    let name = escape_html(&list.name);

    let mut html = String::new();
    let _ = write!(
        html,
        "<html>\n<head>\n<title>{name}</title>\n\
         <style>\n\
         body {{ font-family: Arial, sans-serif; margin: 20px; }}\n\
         h1 {{ color: #333; border-bottom: 2px solid #333; padding-bottom: 10px; }}\n\
         h2 {{ color: #666; margin-top: 30px; }}\n\
         .ingredient {{ padding: 8px; margin: 4px 0; border: 1px solid #ddd; }}\n\
         .recipe {{ background: #f5f5f5; padding: 8px; margin: 4px; border-radius: 4px; }}\n\
         @media print {{ body {{ margin: 0; }} }}\n\
         </style>\n</head>\n<body>\n<h1>{name}</h1>\n<p>Created: {created}</p>\n",
        created = list.created_at.format("%Y-%m-%d"),
    );

    let _ = writeln!(html, "<h2>Recipes ({})</h2>", recipe_names.len());
    for recipe_name in recipe_names {
        let _ = writeln!(html, "<div class=\"recipe\">{}</div>", escape_html(recipe_name));
    }

    let _ = writeln!(
        html,
        "<h2>Shopping List ({} items)</h2>",
        list.ingredients.len()
    );
    for ingredient in &list.ingredients {
        let _ = writeln!(
            html,
            "<div class=\"ingredient\">\u{2610} {}</div>",
            escape_html(&format_ingredient(ingredient))
        );
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
