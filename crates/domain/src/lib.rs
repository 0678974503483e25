//! # Domain Crate
//!
//! Data model for the fridge photo → recipe flow.
//!
//! ## Main Components
//!
//! - **types**: `Recipe` plus the ingredient and recipe list aliases
//! - **upload**: selected files, validation, and `data:` URI previews
//! - **fallback**: fixed data used when the remote services fail
//! - **error**: validation errors raised before any network call
//!
//! ## Example Usage
//!
//! ```ignore
//! use domain::{ImageFile, DEFAULT_MAX_UPLOAD_BYTES};
//!
//! let file = ImageFile::new("fridge.jpg", bytes).with_content_type("image/jpeg");
//! let asset = file.validate(DEFAULT_MAX_UPLOAD_BYTES)?;
//! println!("{} is {} bytes", asset.name, asset.size());
//! ```

pub mod error;
pub mod fallback;
pub mod types;
pub mod upload;

pub use error::{Result, ValidationError};
pub use fallback::{fallback_ingredients, fallback_recipes};
pub use types::{
    CARD_INGREDIENT_LIMIT, IngredientList, MAX_DIFFICULTY, MIN_DIFFICULTY, Recipe, RecipeList,
};
pub use upload::{DEFAULT_MAX_UPLOAD_BYTES, ImageAsset, ImageFile, render_preview, sniff_mime};
