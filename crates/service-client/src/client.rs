//! reqwest implementation of the recognizer and recommender traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use domain::{ImageAsset, IngredientList, RecipeList};

use crate::wire::{RecognizeResponse, RecommendRequest, RecommendResponse};
use crate::{IngredientRecognizer, RecipeRecommender, ServiceError};

/// Default recognition endpoint
pub const DEFAULT_RECOGNIZE_URL: &str = "http://localhost:8000/backend/recognize";

/// Default recommendation endpoint
pub const DEFAULT_RECOMMEND_URL: &str = "http://localhost:8000/backend/recommend";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error bodies longer than this are cut before they reach logs or users
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Where the services live and how long to wait for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub recognize_url: String,
    pub recommend_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            recognize_url: DEFAULT_RECOGNIZE_URL.to_string(),
            recommend_url: DEFAULT_RECOMMEND_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Client for both kitchen services.
///
/// Wraps a single `reqwest::Client`, so it is cheap to clone and reuses
/// connections between the recognize and recommend calls.
#[derive(Debug, Clone)]
pub struct KitchenClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl KitchenClient {
    /// Build a client from configuration. No connection is made yet.
    pub fn new(config: ClientConfig) -> Result<Self, ServiceError> {
        Self::with_timeout(config.timeout(), config)
    }

    /// Build a client with an explicit timeout, ignoring `timeout_secs`.
    pub fn with_timeout(timeout: Duration, config: ClientConfig) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Setup(e.to_string()))?;

        info!(
            "Kitchen client ready (recognize: {}, recommend: {}, timeout: {:?})",
            config.recognize_url, config.recommend_url, timeout
        );

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a request and decode a 2xx JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<T, ServiceError> {
        let response = request.send().await.map_err(|e| {
            error!("Request to {} failed: {}", endpoint, e);
            map_transport_error(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!("Reading response from {} failed: {}", endpoint, e);
            map_transport_error(e)
        })?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            error!("{} answered with HTTP {}", endpoint, status.as_u16());
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body: truncate(&text, MAX_ERROR_BODY_CHARS),
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            error!("Malformed body from {}: {}", endpoint, e);
            ServiceError::InvalidResponse(e.to_string())
        })
    }
}

#[async_trait]
impl IngredientRecognizer for KitchenClient {
    async fn recognize(&self, image: &ImageAsset) -> Result<IngredientList, ServiceError> {
        debug!(
            "Uploading {} ({} bytes) for recognition",
            image.name,
            image.size()
        );

        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.name.clone())
            .mime_str(&image.mime)
            .map_err(|e| ServiceError::Setup(format!("bad MIME type: {e}")))?;
        let form = Form::new().part("file", part);

        let request = self.http.post(&self.config.recognize_url).multipart(form);
        let response: RecognizeResponse = self.send(request, &self.config.recognize_url).await?;

        debug!("Recognized {} ingredients", response.ingredients.len());
        Ok(response.ingredients)
    }
}

#[async_trait]
impl RecipeRecommender for KitchenClient {
    async fn recommend(&self, request: &RecommendRequest) -> Result<RecipeList, ServiceError> {
        debug!(
            "Requesting recipes for {} ingredients (max_time: {}, difficulty_max: {})",
            request.ingredients.len(),
            request.max_time,
            request.difficulty_max
        );

        let builder = self.http.post(&self.config.recommend_url).json(request);
        let response: RecommendResponse = self.send(builder, &self.config.recommend_url).await?;

        let recipes = response.into_recipes();
        debug!("Received {} recipes", recipes.len());
        Ok(recipes)
    }
}

fn map_transport_error(e: reqwest::Error) -> ServiceError {
    if e.is_timeout() {
        ServiceError::Timeout
    } else if e.is_decode() {
        ServiceError::InvalidResponse(e.to_string())
    } else {
        ServiceError::Connection(e.to_string())
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
