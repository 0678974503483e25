//! Session state.
//!
//! One owned instance per session. Only the session in `orchestrator`
//! mutates it; everything else reads snapshots. The selected recipe is
//! stored as an index into the current recipe list, and every write to the
//! list clears it, so a selection can never outlive its list.

use std::sync::Arc;

use domain::{ImageAsset, IngredientList, Recipe, RecipeList};
use tracing::warn;

use crate::view::{View, select_view};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    started: bool,
    image: Option<ImageAsset>,
    ingredients: IngredientList,
    recipes: RecipeList,
    selected: Option<usize>,
    loading: bool,
    error: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn image(&self) -> Option<&ImageAsset> {
        self.image.as_ref()
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_recipe(&self) -> Option<&Recipe> {
        self.selected.and_then(|idx| self.recipes.get(idx))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message to show alongside the current view, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The view this state should be rendered as.
    pub fn view(&self) -> View<'_> {
        select_view(self)
    }

    // ------------------------------------------------------------------
    // Mutations (session only)
    // ------------------------------------------------------------------

    pub(crate) fn start(&mut self) {
        self.started = true;
    }

    /// Drop everything tied to the current photo. `started` survives.
    pub(crate) fn reset(&mut self) {
        *self = Self {
            started: self.started,
            ..Self::default()
        };
    }

    /// Replace the photo and discard results derived from the previous one.
    pub(crate) fn begin_upload(&mut self, image: ImageAsset) {
        self.image = Some(image);
        self.ingredients.clear();
        self.set_recipes(Vec::new());
    }

    pub(crate) fn set_preview(&mut self, preview: Arc<str>) {
        if let Some(image) = self.image.as_mut() {
            image.preview = Some(preview);
        }
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub(crate) fn set_ingredients(&mut self, ingredients: IngredientList) {
        self.ingredients = ingredients;
    }

    pub(crate) fn set_recipes(&mut self, recipes: RecipeList) {
        self.recipes = recipes;
        self.selected = None;
    }

    pub(crate) fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    /// Add a message after any already showing.
    pub(crate) fn append_error(&mut self, message: String) {
        self.error = Some(match self.error.take() {
            Some(existing) => format!("{existing} {message}"),
            None => message,
        });
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }

    /// Returns false (and changes nothing) if `index` is not in the list.
    pub(crate) fn select(&mut self, index: usize) -> bool {
        if index >= self.recipes.len() {
            warn!(
                "Ignoring selection of recipe {} (only {} available)",
                index,
                self.recipes.len()
            );
            return false;
        }
        self.selected = Some(index);
        true
    }

    pub(crate) fn dismiss(&mut self) {
        self.selected = None;
    }
}
