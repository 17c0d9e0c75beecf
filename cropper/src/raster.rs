//! Rasterization: draws a source rectangle into a viewport-sized surface.
//!
//! DESIGN
//! ======
//! Mirrors the 2D-canvas `drawImage(src, sx, sy, sw, sh, 0, 0, dw, dh)`
//! contract: the source rectangle is stretched over the whole destination,
//! sampled bilinearly, and any part of the rectangle that falls outside the
//! source image leaves the destination transparent.
//!
//! ERROR HANDLING
//! ==============
//! Surface acquisition is fallible (`None`) so the caller can no-op instead of
//! producing a partial image. Encoding failures are returned as [`CropError`].

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::interpolate_bilinear;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::consts::JPEG_QUALITY;
use crate::geometry::{Rect, Size};

/// Upper bound on output surface area, in pixels.
const MAX_SURFACE_PIXELS: u64 = 64 * 1024 * 1024;

/// Errors produced while decoding a source or encoding the cropped output.
#[derive(Debug, thiserror::Error)]
pub enum CropError {
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image encode failed: {0}")]
    Encode(String),
}

/// Encoding for the committed crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// The single output of a committed crop session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CroppedImage {
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
}

/// Decode uploaded bytes (PNG or JPEG) into a source image.
///
/// # Errors
///
/// Returns `Decode` if the bytes are not a supported image.
pub fn decode_source(bytes: &[u8]) -> Result<DynamicImage, CropError> {
    Ok(image::load_from_memory(bytes)?)
}

/// Allocate a transparent RGBA surface, or `None` if the size is unusable.
#[must_use]
pub fn acquire_surface(width: u32, height: u32) -> Option<RgbaImage> {
    if width == 0 || height == 0 {
        return None;
    }
    let pixels = u64::from(width) * u64::from(height);
    if pixels > MAX_SURFACE_PIXELS {
        return None;
    }
    let Ok(len) = usize::try_from(pixels * 4) else {
        return None;
    };
    RgbaImage::from_raw(width, height, vec![0; len])
}

/// Viewport size in whole pixels, or `None` for non-positive or non-finite sizes.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn surface_dims(viewport: Size) -> Option<(u32, u32)> {
    let valid = |v: f64| v.is_finite() && v >= 1.0 && v <= f64::from(u32::MAX);
    if !valid(viewport.width) || !valid(viewport.height) {
        return None;
    }
    Some((viewport.width.round() as u32, viewport.height.round() as u32))
}

/// Draw `src` (source-image pixels) stretched over the whole `surface`.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_region(surface: &mut RgbaImage, source: &RgbaImage, src: Rect) {
    let (dw, dh) = surface.dimensions();
    let (sw, sh) = source.dimensions();
    if sw == 0 || sh == 0 || src.width <= 0.0 || src.height <= 0.0 {
        return;
    }
    let step_x = src.width / f64::from(dw);
    let step_y = src.height / f64::from(dh);
    let max_x = f64::from(sw);
    let max_y = f64::from(sh);

    for dy in 0..dh {
        let cy = src.y + (f64::from(dy) + 0.5) * step_y;
        if cy < 0.0 || cy >= max_y {
            continue;
        }
        for dx in 0..dw {
            let cx = src.x + (f64::from(dx) + 0.5) * step_x;
            if cx < 0.0 || cx >= max_x {
                continue;
            }
            let (x, y) = ((cx - 0.5).clamp(0.0, max_x - 1.0), (cy - 0.5).clamp(0.0, max_y - 1.0));
            if let Some(pixel) = interpolate_bilinear(source, x as f32, y as f32) {
                surface.put_pixel(dx, dy, pixel);
            }
        }
    }
}

/// Rasterize `src` from `source` into a new surface sized to `viewport`.
///
/// Returns `None` if the surface cannot be acquired.
#[must_use]
pub fn rasterize(source: &DynamicImage, src: Rect, viewport: Size) -> Option<RgbaImage> {
    let (width, height) = surface_dims(viewport)?;
    let mut surface = acquire_surface(width, height)?;
    let pixels = source.to_rgba8();
    draw_region(&mut surface, &pixels, src);
    Some(surface)
}

/// Encode a finished surface.
///
/// # Errors
///
/// Returns `Encode` if the encoder rejects the image.
pub fn encode(surface: RgbaImage, format: OutputFormat) -> Result<CroppedImage, CropError> {
    let (width, height) = surface.dimensions();
    let mut bytes = Vec::new();
    match format {
        OutputFormat::Png => {
            DynamicImage::ImageRgba8(surface)
                .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                .map_err(|e| CropError::Encode(e.to_string()))?;
        }
        OutputFormat::Jpeg => {
            let flat = DynamicImage::ImageRgba8(surface).to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY)
                .encode_image(&flat)
                .map_err(|e| CropError::Encode(e.to_string()))?;
        }
    }
    Ok(CroppedImage { width, height, format, bytes })
}
