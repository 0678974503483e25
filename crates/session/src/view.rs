//! Presentation selector.
//!
//! A pure function from session state to the one view that should be on
//! screen. Hosts call it after every change and render the result; the
//! error message is rendered separately as a banner over whichever view
//! is active.

use domain::{ImageAsset, Recipe};

use crate::state::SessionState;

/// Mutually exclusive screens, borrowed from the state they describe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    /// Session not started yet
    Splash,
    /// Started, nothing selected yet
    UploadPrompt,
    /// An analysis is in flight
    Loading,
    /// A photo is selected but there is nothing to list (yet)
    Preview(&'a ImageAsset),
    /// Ranked recipe cards for the recognized ingredients
    Results {
        ingredients: &'a [String],
        recipes: &'a [Recipe],
    },
    /// Detail modal for one recipe
    Detail(&'a Recipe),
}

impl View<'_> {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            View::Splash => "splash",
            View::UploadPrompt => "upload-prompt",
            View::Loading => "loading",
            View::Preview(_) => "preview",
            View::Results { .. } => "results",
            View::Detail(_) => "detail",
        }
    }
}

/// Derive the visible view. Earlier checks mask later ones.
pub fn select_view(state: &SessionState) -> View<'_> {
    if !state.is_started() {
        return View::Splash;
    }
    if state.is_loading() {
        return View::Loading;
    }
    if let Some(recipe) = state.selected_recipe() {
        return View::Detail(recipe);
    }
    if !state.recipes().is_empty() {
        return View::Results {
            ingredients: state.ingredients(),
            recipes: state.recipes(),
        };
    }
    if let Some(image) = state.image() {
        return View::Preview(image);
    }
    View::UploadPrompt
}
