//! Core domain types shared by the client and the session.
//!
//! Recipes arrive from the recommendation service and are never modified
//! afterwards. There is no global recipe ID; within a session a recipe is
//! identified by its position in the current result list.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Ingredient names in the order the recognition service reported them.
///
/// An empty list is a valid answer ("nothing recognized"), not a failure.
pub type IngredientList = Vec<String>;

/// Recipes ranked most relevant first.
pub type RecipeList = Vec<Recipe>;

/// Lowest difficulty on the rating scale
pub const MIN_DIFFICULTY: u8 = 1;

/// Highest difficulty on the rating scale
pub const MAX_DIFFICULTY: u8 = 5;

/// How many ingredients a result card lists before eliding the rest
pub const CARD_INGREDIENT_LIMIT: usize = 3;

// =============================================================================
// Recipe
// =============================================================================

/// A recipe as returned by the recommendation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    /// Estimated total time in minutes
    pub time: u32,
    /// 1 (easy) through 5 (hard) as sent; see [`Recipe::difficulty_level`]
    pub difficulty: i64,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Ingredient similarity reported by similarity-aware recommenders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f32>,
    /// Fraction of the user's ingredients this recipe uses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_rate: Option<f32>,
}

impl Recipe {
    /// Build a recipe with only the required fields set.
    pub fn new(
        name: impl Into<String>,
        time: u32,
        difficulty: i64,
        ingredients: Vec<String>,
        steps: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            time,
            difficulty,
            ingredients,
            steps,
            summary: None,
            similarity_score: None,
            match_rate: None,
        }
    }

    /// Attach a short summary (builder pattern).
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Difficulty clamped onto the 1..=5 scale.
    ///
    /// Services occasionally send values outside the scale; those are shown
    /// at the nearest bound rather than rejected.
    pub fn difficulty_level(&self) -> u8 {
        self.difficulty
            .clamp(i64::from(MIN_DIFFICULTY), i64::from(MAX_DIFFICULTY)) as u8
    }

    /// Short ingredient line for a result card: the first few names joined
    /// by commas, with `...` appended when some were left out.
    pub fn card_ingredients(&self) -> String {
        let shown = self
            .ingredients
            .iter()
            .take(CARD_INGREDIENT_LIMIT)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        if self.ingredients.len() > CARD_INGREDIENT_LIMIT {
            format!("{shown}...")
        } else {
            shown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_card_ingredients_elides_after_three() {
        let recipe = Recipe::new(
            "Fried Rice",
            15,
            1,
            strings(&["rice", "egg", "salt", "oil"]),
            vec![],
        );
        assert_eq!(recipe.card_ingredients(), "rice, egg, salt...");
    }

    #[test]
    fn test_card_ingredients_short_list_is_not_elided() {
        let recipe = Recipe::new("Toast", 5, 1, strings(&["bread", "butter"]), vec![]);
        assert_eq!(recipe.card_ingredients(), "bread, butter");

        let empty = Recipe::new("Water", 0, 1, vec![], vec![]);
        assert_eq!(empty.card_ingredients(), "");
    }

    #[test]
    fn test_difficulty_level_is_clamped() {
        let mut recipe = Recipe::new("Soup", 30, 0, vec![], vec![]);
        assert_eq!(recipe.difficulty_level(), 1);

        recipe.difficulty = 9;
        assert_eq!(recipe.difficulty_level(), 5);

        recipe.difficulty = 3;
        assert_eq!(recipe.difficulty_level(), 3);
    }

    #[test]
    fn test_out_of_scale_difficulty_deserializes_and_clamps() {
        let low: Recipe = serde_json::from_str(
            r#"{"name":"Salad","time":5,"difficulty":-1,"ingredients":[],"steps":[]}"#,
        )
        .unwrap();
        assert_eq!(low.difficulty, -1);
        assert_eq!(low.difficulty_level(), 1);

        let high: Recipe = serde_json::from_str(
            r#"{"name":"Croissant","time":600,"difficulty":300,"ingredients":[],"steps":[]}"#,
        )
        .unwrap();
        assert_eq!(high.difficulty_level(), 5);
    }

    #[test]
    fn test_recipe_deserializes_without_optional_fields() {
        let json = r#"{
            "name": "Fried Rice",
            "time": 15,
            "difficulty": 1,
            "ingredients": ["rice", "egg", "salt", "oil"],
            "steps": ["step1", "step2"]
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.name, "Fried Rice");
        assert_eq!(recipe.steps.len(), 2);
        assert!(recipe.summary.is_none());
        assert!(recipe.similarity_score.is_none());
    }

    #[test]
    fn test_recipe_accepts_similarity_fields() {
        let json = r#"{
            "name": "Tofu Stew",
            "summary": "Tofu Stew - a warm dish",
            "time": 20,
            "difficulty": 2,
            "ingredients": ["tofu"],
            "steps": ["boil"],
            "similarity_score": 0.75,
            "match_rate": 0.5,
            "matched_ingredients_count": 1
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.summary.as_deref(), Some("Tofu Stew - a warm dish"));
        assert_eq!(recipe.similarity_score, Some(0.75));
        assert_eq!(recipe.match_rate, Some(0.5));
    }
}
