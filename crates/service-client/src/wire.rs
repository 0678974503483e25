//! Request and response bodies exchanged with the kitchen services.

use domain::{IngredientList, Recipe, RecipeList};
use serde::{Deserialize, Deserializer, Serialize};

/// Default upper bound on total cooking time, in minutes
pub const DEFAULT_MAX_TIME: u32 = 60;

/// Default upper bound on recipe difficulty
pub const DEFAULT_DIFFICULTY_MAX: u8 = 3;

/// Filters sent with every recommendation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendFilters {
    pub max_time: u32,
    pub difficulty_max: u8,
}

impl Default for RecommendFilters {
    fn default() -> Self {
        Self {
            max_time: DEFAULT_MAX_TIME,
            difficulty_max: DEFAULT_DIFFICULTY_MAX,
        }
    }
}

/// Body of `POST /recommend`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub ingredients: IngredientList,
    pub max_time: u32,
    pub difficulty_max: u8,
}

impl RecommendRequest {
    pub fn new(ingredients: IngredientList, filters: RecommendFilters) -> Self {
        Self {
            ingredients,
            max_time: filters.max_time,
            difficulty_max: filters.difficulty_max,
        }
    }

    pub fn filters(&self) -> RecommendFilters {
        RecommendFilters {
            max_time: self.max_time,
            difficulty_max: self.difficulty_max,
        }
    }
}

/// Body returned by `POST /recognize`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecognizeResponse {
    pub ingredients: IngredientList,
}

/// Body returned by `POST /recommend`.
///
/// The plain recommender wraps the list in an object; the similarity-aware
/// one returns a bare array. Both are accepted. A body that fits neither
/// reports the error from the shape it looked like.
#[derive(Debug, Clone)]
pub enum RecommendResponse {
    Wrapped { recipes: Vec<Recipe> },
    Bare(Vec<Recipe>),
}

#[derive(Deserialize)]
struct WrappedRecipes {
    recipes: Vec<Recipe>,
}

impl<'de> Deserialize<'de> for RecommendResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let parsed = if value.is_array() {
            serde_json::from_value(value).map(RecommendResponse::Bare)
        } else {
            serde_json::from_value::<WrappedRecipes>(value)
                .map(|body| RecommendResponse::Wrapped { recipes: body.recipes })
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

impl RecommendResponse {
    pub fn into_recipes(self) -> RecipeList {
        match self {
            RecommendResponse::Wrapped { recipes } => recipes,
            RecommendResponse::Bare(recipes) => recipes,
        }
    }
}
