//! Errors surfaced by a session.
//!
//! Only [`SessionError::Validation`] is returned as an `Err` from an upload.
//! The other variants are recovered locally and reported through the
//! session's error message and the upload outcome.

use thiserror::Error;

use domain::ValidationError;
use service_client::ServiceError;

/// Everything that can go wrong while analysing a photo.
///
/// The `Display` text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Local precondition failed; nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Recognize failed; fallback ingredients were substituted
    #[error("Could not analyze the photo ({0}). Showing sample ingredients instead.")]
    RecognitionFailure(ServiceError),

    /// Recognize succeeded but found nothing; Recommend was skipped
    #[error("No ingredients were recognized in the photo. Try another picture.")]
    EmptyRecognition,

    /// Recommend failed; the fallback recipe was substituted
    #[error("Could not fetch recipes ({0}). Showing a sample recipe instead.")]
    RecommendationFailure(ServiceError),
}

impl SessionError {
    /// Whether fallback data was substituted for this error
    pub fn is_recovered(&self) -> bool {
        matches!(
            self,
            SessionError::RecognitionFailure(_) | SessionError::RecommendationFailure(_)
        )
    }
}
