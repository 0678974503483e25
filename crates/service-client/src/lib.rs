//! HTTP client for the ingredient recognition and recipe recommendation
//! services.
//!
//! This crate provides:
//! - The [`IngredientRecognizer`] and [`RecipeRecommender`] traits, the
//!   seams the session orchestrator is written against
//! - [`KitchenClient`], a reqwest-backed implementation of both
//! - Wire types for the two endpoints
//!
//! Anything other than a 2xx response with a well-formed body is reported
//! as a [`ServiceError`]; callers decide how to degrade.

use async_trait::async_trait;
use thiserror::Error;

use domain::{ImageAsset, IngredientList, RecipeList};

pub mod client;
pub mod wire;

pub use client::{ClientConfig, KitchenClient};
pub use wire::{
    DEFAULT_DIFFICULTY_MAX, DEFAULT_MAX_TIME, RecognizeResponse, RecommendFilters,
    RecommendRequest, RecommendResponse,
};

/// Errors that can occur when talking to a kitchen service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The client or the outgoing request could not be built
    #[error("could not prepare request: {0}")]
    Setup(String),

    #[error("could not reach service: {0}")]
    Connection(String),

    #[error("service did not answer in time")]
    Timeout,

    #[error("service answered with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response from service: {0}")]
    InvalidResponse(String),
}

/// Maps a photo to the ingredients visible in it.
#[async_trait]
pub trait IngredientRecognizer: Send + Sync {
    async fn recognize(&self, image: &ImageAsset) -> Result<IngredientList, ServiceError>;
}

/// Maps an ingredient list plus filters to a ranked recipe list.
#[async_trait]
pub trait RecipeRecommender: Send + Sync {
    async fn recommend(&self, request: &RecommendRequest) -> Result<RecipeList, ServiceError>;
}
