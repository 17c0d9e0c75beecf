//! Upload widgets — logo, cover, and category images through the cropper,
//! plus the file reader behind the advertisement image picker.

use std::path::{Path, PathBuf};

use composer::images::ImageData;
use cropper::engine::CropperCore;
use cropper::raster::{CropError, OutputFormat, decode_source};
use cropper::session::AspectMode;
use futures::future::try_join_all;
use image::DynamicImage;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("image decode failed: {0}")]
    Crop(#[from] CropError),
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is not a supported image")]
    NotImage(PathBuf),
    #[error("crop produced no image")]
    CommitFailed,
}

// =============================================================================
// CROPPED UPLOADS
// =============================================================================

/// Which branded image an upload is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    Logo,
    Cover,
    CategoryImage,
}

impl UploadTarget {
    #[must_use]
    pub fn aspect(self) -> AspectMode {
        match self {
            Self::Logo | Self::CategoryImage => AspectMode::Square,
            Self::Cover => AspectMode::Wide,
        }
    }

    /// Logos keep transparency; photos compress as JPEG.
    #[must_use]
    pub fn format(self) -> OutputFormat {
        match self {
            Self::Logo => OutputFormat::Png,
            Self::Cover | Self::CategoryImage => OutputFormat::Jpeg,
        }
    }
}

/// An open crop dialog: the decoded upload and the cropper driving it.
pub struct CropJob {
    pub target: UploadTarget,
    pub core: CropperCore,
    source: DynamicImage,
}

impl CropJob {
    #[must_use]
    pub fn source(&self) -> &DynamicImage {
        &self.source
    }

    /// Commit the crop as an upload-ready image.
    ///
    /// # Errors
    ///
    /// Returns `CommitFailed` when the cropper could not produce output.
    pub fn finish(self) -> Result<ImageData, UploadError> {
        let cropped = self.core.commit(&self.source).ok_or(UploadError::CommitFailed)?;
        debug!(upload = ?self.target, width = cropped.width, height = cropped.height, size = cropped.bytes.len(), "crop finished");
        Ok(ImageData::new(cropped.format.mime(), cropped.bytes))
    }

    pub fn cancel(self) {
        self.core.cancel();
    }
}

/// Decode an uploaded file and open a crop session sized for `target`.
///
/// # Errors
///
/// Returns `Crop` when the bytes are not a decodable PNG or JPEG.
pub fn open_crop(bytes: &[u8], target: UploadTarget) -> Result<CropJob, UploadError> {
    let source = decode_source(bytes)?;
    let core = CropperCore::for_image(&source, target.aspect()).with_format(target.format());
    Ok(CropJob { target, core, source })
}

/// Commit `job`; shorthand for [`CropJob::finish`].
///
/// # Errors
///
/// See [`CropJob::finish`].
pub fn finish_crop(job: CropJob) -> Result<ImageData, UploadError> {
    job.finish()
}

// =============================================================================
// ADVERTISEMENT IMAGES
// =============================================================================

/// Read up to `remaining` image files. Paths past the capacity are skipped
/// without being opened.
///
/// # Errors
///
/// Returns the first read failure, or `NotImage` for a file whose content is
/// not a recognized image format.
pub async fn read_image_files(paths: &[PathBuf], remaining: usize) -> Result<Vec<ImageData>, UploadError> {
    let (take, skipped) = (paths.len().min(remaining), paths.len().saturating_sub(remaining));
    if skipped > 0 {
        warn!(skipped, remaining, "image capacity reached; extra files not read");
    }
    try_join_all(paths[..take].iter().map(|p| read_image_file(p))).await
}

async fn read_image_file(path: &Path) -> Result<ImageData, UploadError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| UploadError::Io { path: path.to_path_buf(), source })?;
    let format = image::guess_format(&bytes).map_err(|_| UploadError::NotImage(path.to_path_buf()))?;
    Ok(ImageData::new(format.to_mime_type(), bytes))
}

#[cfg(test)]
#[path = "uploads_test.rs"]
mod tests;
