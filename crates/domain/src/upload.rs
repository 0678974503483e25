//! Selected image files and their local previews.
//!
//! An [`ImageFile`] is whatever the host hands over when the user picks a
//! file. Validation turns it into an [`ImageAsset`], which the session keeps
//! until the next selection or a reset.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::error::{Result, ValidationError};

/// Upload limit used when nothing else is configured (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// A file as presented by the host platform.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    pub bytes: Vec<u8>,
    /// MIME type reported by the platform, if it reported one
    pub content_type: Option<String>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            content_type: None,
        }
    }

    /// Record the platform's MIME type (builder pattern).
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Check local preconditions and turn the file into an asset.
    ///
    /// Accepts anything the platform labels `image/*`. Without a label the
    /// bytes are sniffed for a known image signature.
    pub fn validate(self, max_bytes: u64) -> Result<ImageAsset> {
        if self.bytes.is_empty() {
            return Err(ValidationError::EmptyFile { name: self.name });
        }

        let size = self.size();
        if size > max_bytes {
            return Err(ValidationError::FileTooLarge {
                size,
                max: max_bytes,
            });
        }

        let mime = match self.content_type {
            Some(ref declared) if declared.starts_with("image/") => declared.clone(),
            Some(_) => return Err(ValidationError::NotAnImage { name: self.name }),
            None => match sniff_mime(&self.bytes) {
                Some(mime) => mime.to_string(),
                None => return Err(ValidationError::NotAnImage { name: self.name }),
            },
        };

        debug!("Accepted {} ({} bytes, {})", self.name, size, mime);

        Ok(ImageAsset {
            name: self.name,
            mime,
            bytes: self.bytes.into(),
            preview: None,
        })
    }
}

/// MIME type of an image recognised from its leading bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|format| format.to_mime_type())
}

/// A validated image held by the session.
///
/// Cloning is cheap: the bytes and the preview are reference counted.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAsset {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
    /// `data:` URI for display; filled in once rendering finishes
    pub preview: Option<Arc<str>>,
}

impl ImageAsset {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn has_preview(&self) -> bool {
        self.preview.is_some()
    }
}

/// Encode image bytes as a displayable `data:` URI.
///
/// CPU-bound for large photos; callers on an async runtime should run this
/// on a blocking worker.
pub fn render_preview(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn png_bytes(len: usize) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.resize(len.max(PNG_SIGNATURE.len()), 0);
        bytes
    }

    #[test]
    fn test_validate_rejects_oversized_file() {
        let file = ImageFile::new("fridge.jpg", vec![0u8; 1024]).with_content_type("image/jpeg");
        let err = file.validate(512).unwrap_err();
        assert_eq!(err, ValidationError::FileTooLarge { size: 1024, max: 512 });
    }

    #[test]
    fn test_validate_accepts_file_at_limit() {
        let file = ImageFile::new("fridge.jpg", vec![0u8; 512]).with_content_type("image/jpeg");
        let asset = file.validate(512).unwrap();
        assert_eq!(asset.size(), 512);
        assert_eq!(asset.mime, "image/jpeg");
        assert!(!asset.has_preview());
    }

    #[test]
    fn test_validate_rejects_declared_non_image() {
        let file = ImageFile::new("notes.txt", b"milk, eggs".to_vec()).with_content_type("text/plain");
        assert!(matches!(
            file.validate(DEFAULT_MAX_UPLOAD_BYTES),
            Err(ValidationError::NotAnImage { .. })
        ));
    }

    #[test]
    fn test_validate_sniffs_undeclared_files() {
        let asset = ImageFile::new("fridge", png_bytes(64))
            .validate(DEFAULT_MAX_UPLOAD_BYTES)
            .unwrap();
        assert_eq!(asset.mime, "image/png");

        let err = ImageFile::new("fridge", b"plain text".to_vec())
            .validate(DEFAULT_MAX_UPLOAD_BYTES)
            .unwrap_err();
        assert!(matches!(err, ValidationError::NotAnImage { .. }));
    }

    #[test]
    fn test_validate_rejects_empty_file() {
        let err = ImageFile::new("empty.png", vec![])
            .with_content_type("image/png")
            .validate(DEFAULT_MAX_UPLOAD_BYTES)
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyFile { name: "empty.png".into() });
    }

    #[test]
    fn test_render_preview_builds_data_uri() {
        let uri = render_preview("image/png", b"abc");
        assert_eq!(uri, "data:image/png;base64,YWJj");
    }
}
