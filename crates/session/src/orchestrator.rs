//! # Upload & Recognition Orchestrator
//!
//! This module drives a session from photo selection to recipe list:
//! 1. Validate the selected file and show it
//! 2. Render the preview on a blocking worker
//! 3. Recognize ingredients (fallback list on failure)
//! 4. Recommend recipes for them (fallback recipe on failure)
//! 5. Release the loading flag, whatever happened
//!
//! Every state change is published on a `watch` channel so a host can
//! re-render the derived view while the calls are in flight.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use domain::{ImageAsset, ImageFile, fallback_ingredients, fallback_recipes, render_preview};
use service_client::{IngredientRecognizer, RecipeRecommender, RecommendFilters, RecommendRequest};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::state::SessionState;
use crate::view::View;

/// How an accepted upload ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Another analysis was still running; the selection was dropped
    Ignored,
    /// Recognition found nothing, so no recipes were requested
    NoIngredients,
    /// Recipes are in the session state; `issues` lists what fell back
    Recommended {
        recipes: usize,
        issues: Vec<SessionError>,
    },
}

impl UploadOutcome {
    /// True if any fallback data is being shown
    pub fn is_degraded(&self) -> bool {
        matches!(self, UploadOutcome::Recommended { issues, .. } if !issues.is_empty())
    }
}

/// A single user session: owns the state and both service collaborators.
pub struct Session<R, C> {
    state: SessionState,
    recognizer: R,
    recommender: C,
    config: SessionConfig,
    updates: watch::Sender<SessionState>,
}

impl<R, C> Session<R, C>
where
    R: IngredientRecognizer,
    C: RecipeRecommender,
{
    pub fn new(recognizer: R, recommender: C, config: SessionConfig) -> Self {
        let state = SessionState::new();
        let (updates, _) = watch::channel(state.clone());
        Self {
            state,
            recognizer,
            recommender,
            config,
            updates,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn view(&self) -> View<'_> {
        self.state.view()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Receive a snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.updates.subscribe()
    }

    /// Leave the splash screen.
    pub fn start(&mut self) {
        self.state.start();
        self.publish();
    }

    /// Forget the current photo and its results.
    pub fn reset(&mut self) {
        self.state.reset();
        self.publish();
    }

    /// Open the detail view for the recipe at `index` in the current list.
    pub fn select(&mut self, index: usize) -> bool {
        let selected = self.state.select(index);
        if selected {
            self.publish();
        }
        selected
    }

    /// Close the detail view.
    pub fn dismiss(&mut self) {
        self.state.dismiss();
        self.publish();
    }

    /// Handle a file selection: validate, recognize, recommend.
    ///
    /// Returns `Err` only for validation failures, in which case nothing was
    /// sent and the session is otherwise untouched. Remote failures are
    /// recovered with fallback data and listed in the outcome.
    pub async fn upload(&mut self, file: ImageFile) -> Result<UploadOutcome, SessionError> {
        if self.state.is_loading() {
            warn!("Ignoring {}: an analysis is already running", file.name);
            return Ok(UploadOutcome::Ignored);
        }

        let image = match file.validate(self.config.max_upload_bytes) {
            Ok(image) => image,
            Err(e) => {
                let err = SessionError::from(e);
                warn!("Rejected upload: {}", err);
                self.state.set_error(err.to_string());
                self.publish();
                return Err(err);
            }
        };

        let start_time = Instant::now();
        info!("Analyzing {} ({} bytes)", image.name, image.size());

        let mut preview = Some(spawn_preview(&image));
        self.state.begin_upload(image.clone());
        self.publish();

        let Self {
            state,
            recognizer,
            recommender,
            config,
            updates,
        } = self;

        let outcome = {
            let mut guard = LoadingGuard::engage(state, updates);
            analyze(&mut guard, recognizer, recommender, config.filters(), &image, &mut preview).await
        };

        if let Some(handle) = preview.take() {
            attach_preview(state, handle).await;
            publish(state, updates);
        }

        info!(
            "Finished analyzing {} in {:.2?}: {:?}",
            image.name,
            start_time.elapsed(),
            outcome
        );
        Ok(outcome)
    }

    fn publish(&self) {
        publish(&self.state, &self.updates);
    }
}

/// Steps 3 and 4. Runs with the loading flag held by `guard`.
async fn analyze<R, C>(
    guard: &mut LoadingGuard<'_>,
    recognizer: &R,
    recommender: &C,
    filters: RecommendFilters,
    image: &ImageAsset,
    preview: &mut Option<JoinHandle<String>>,
) -> UploadOutcome
where
    R: IngredientRecognizer,
    C: RecipeRecommender,
{
    let mut issues = Vec::new();

    let recognized = recognizer.recognize(image).await;

    if let Some(handle) = preview.take_if(|handle| handle.is_finished()) {
        attach_preview(&mut *guard.state, handle).await;
    }

    let ingredients = match recognized {
        Ok(ingredients) if ingredients.is_empty() => {
            let err = SessionError::EmptyRecognition;
            info!("Recognition found no ingredients; skipping recommendation");
            guard.state.set_error(err.to_string());
            guard.publish();
            return UploadOutcome::NoIngredients;
        }
        Ok(ingredients) => {
            info!("Recognized {} ingredients", ingredients.len());
            guard.state.set_ingredients(ingredients.clone());
            guard.state.clear_error();
            guard.publish();
            ingredients
        }
        Err(e) => {
            warn!("Recognition failed, using fallback ingredients: {}", e);
            let err = SessionError::RecognitionFailure(e);
            let ingredients = fallback_ingredients();
            guard.state.set_error(err.to_string());
            guard.state.set_ingredients(ingredients.clone());
            guard.publish();
            issues.push(err);
            ingredients
        }
    };

    let request = RecommendRequest::new(ingredients, filters);
    match recommender.recommend(&request).await {
        Ok(recipes) => {
            info!("Received {} recipes", recipes.len());
            guard.state.set_recipes(recipes);
            if issues.is_empty() {
                guard.state.clear_error();
            }
        }
        Err(e) => {
            warn!("Recommendation failed, using fallback recipe: {}", e);
            let err = SessionError::RecommendationFailure(e);
            guard.state.append_error(err.to_string());
            guard.state.set_recipes(fallback_recipes());
            issues.push(err);
        }
    }
    guard.publish();

    UploadOutcome::Recommended {
        recipes: guard.state.recipes().len(),
        issues,
    }
}

/// Holds `loading = true` for its lifetime.
///
/// Dropping it clears the flag and publishes, which also covers the upload
/// future being dropped part-way through a remote call.
struct LoadingGuard<'a> {
    state: &'a mut SessionState,
    updates: &'a watch::Sender<SessionState>,
}

impl<'a> LoadingGuard<'a> {
    fn engage(state: &'a mut SessionState, updates: &'a watch::Sender<SessionState>) -> Self {
        state.set_loading(true);
        state.clear_error();
        publish(state, updates);
        Self { state, updates }
    }

    fn publish(&self) {
        publish(&*self.state, self.updates);
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.set_loading(false);
        publish(&*self.state, self.updates);
    }
}

fn publish(state: &SessionState, updates: &watch::Sender<SessionState>) {
    debug!("View is now {}", state.view().name());
    updates.send_replace(state.clone());
}

fn spawn_preview(image: &ImageAsset) -> JoinHandle<String> {
    let mime = image.mime.clone();
    let bytes = Arc::clone(&image.bytes);
    tokio::task::spawn_blocking(move || render_preview(&mime, &bytes))
}

async fn attach_preview(state: &mut SessionState, handle: JoinHandle<String>) {
    match handle.await {
        Ok(uri) => state.set_preview(uri.into()),
        Err(e) => warn!("Preview rendering did not finish: {}", e),
    }
}
