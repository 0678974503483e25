//! Fixed data substituted when a remote service cannot be reached.
//!
//! The session shows these alongside the error message so the interface
//! stays usable offline. They are deliberately small and never change.

use crate::types::{IngredientList, Recipe, RecipeList};

/// Stand-in for a failed recognition call.
pub fn fallback_ingredients() -> IngredientList {
    ["egg", "rice", "green onion"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Stand-in for a failed recommendation call: always exactly one recipe.
pub fn fallback_recipes() -> RecipeList {
    let recipe = Recipe::new(
        "Soy Sauce Egg Fried Rice",
        15,
        1,
        ["rice", "egg", "soy sauce", "oil", "green onion"]
            .into_iter()
            .map(String::from)
            .collect(),
        vec![
            "Heat oil in a pan and scramble the egg.".to_string(),
            "Add the rice and stir-fry it with the egg.".to_string(),
            "Season with soy sauce and finish with green onion.".to_string(),
        ],
    )
    .with_summary("A quick fried rice from pantry staples.");

    vec![recipe]
}
