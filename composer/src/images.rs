//! Image payloads and the bounded, ordered image list.
//!
//! DESIGN
//! ======
//! Images travel as `data:` URIs between the browser and the composer, so
//! [`ImageData`] serializes to and from that form. The list keeps insertion
//! order; index 0 is the main (cover) image and the only reordering is
//! promoting another image into that slot.

#[cfg(test)]
#[path = "images_test.rs"]
mod images_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_IMAGES;

// =============================================================================
// IMAGE DATA
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataUriError {
    #[error("not a data URI")]
    MissingScheme,
    #[error("data URI is not base64 encoded")]
    NotBase64,
    #[error("data URI media type '{0}' is not an image")]
    NotImage(String),
    #[error("data URI payload is invalid: {0}")]
    Payload(String),
}

/// Binary image content with its media type.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageData {
    mime: String,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageData")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageData {
    #[must_use]
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { mime: mime.into(), bytes }
    }

    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// File extension for storage paths.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "bin",
        }
    }

    /// Encode as `data:<mime>;base64,<payload>`.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    /// Decode a base64 `data:` URI carrying an `image/*` payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheme, encoding, media type, or payload is invalid.
    pub fn from_data_uri(uri: &str) -> Result<Self, DataUriError> {
        let rest = uri.trim().strip_prefix("data:").ok_or(DataUriError::MissingScheme)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUriError::MissingScheme)?;
        let mut params = header.split(';');
        let mime = params.next().unwrap_or_default().trim().to_ascii_lowercase();
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(DataUriError::NotBase64);
        }
        if !mime.starts_with("image/") {
            return Err(DataUriError::NotImage(mime));
        }
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| DataUriError::Payload(e.to_string()))?;
        Ok(Self { mime, bytes })
    }
}

impl TryFrom<String> for ImageData {
    type Error = DataUriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_data_uri(&value)
    }
}

impl From<ImageData> for String {
    fn from(value: ImageData) -> Self {
        value.to_data_uri()
    }
}

// =============================================================================
// IMAGE LIST
// =============================================================================

/// Result of appending files to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddOutcome {
    pub accepted: usize,
    pub dropped: usize,
}

/// Ordered images for a draft. Never holds more than [`MAX_IMAGES`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageList {
    items: Vec<ImageData>,
}

impl ImageList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// How many more images fit.
    #[must_use]
    pub fn remaining(&self) -> usize {
        MAX_IMAGES.saturating_sub(self.items.len())
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    /// The cover image (index 0), if any.
    #[must_use]
    pub fn main(&self) -> Option<&ImageData> {
        self.items.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageData> {
        self.items.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ImageData] {
        &self.items
    }

    /// Append images up to the remaining capacity; the rest are dropped.
    pub fn add(&mut self, images: impl IntoIterator<Item = ImageData>) -> AddOutcome {
        let mut outcome = AddOutcome::default();
        for image in images {
            if self.is_full() {
                outcome.dropped += 1;
            } else {
                self.items.push(image);
                outcome.accepted += 1;
            }
        }
        outcome
    }

    /// Remove the image at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<ImageData> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Make image `index` the main image by swapping it with index 0.
    pub fn promote(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.items.len() {
            return false;
        }
        self.items.swap(0, index);
        true
    }
}
