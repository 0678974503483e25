//! Error types for the domain crate.
//!
//! Only local precondition failures live here. Remote failures belong to the
//! service client, and the session layer wraps both into its own taxonomy.

use thiserror::Error;

/// Reasons a selected file is refused before any remote call is made.
///
/// The `Display` text is shown to the user as-is, so keep it short and
/// free of internal detail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// File is bigger than the configured upload limit
    #[error("The photo is too large ({size} bytes). Please choose a file under {max} bytes.")]
    FileTooLarge { size: u64, max: u64 },

    /// The platform (or the file contents) says this is not an image
    #[error("'{name}' is not an image file.")]
    NotAnImage { name: String },

    /// Zero-byte file
    #[error("'{name}' is empty.")]
    EmptyFile { name: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ValidationError>;
