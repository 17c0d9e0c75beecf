//! Shared numeric constants for the cropper crate.

// ── Viewports ───────────────────────────────────────────────────

/// Square crop frame edge, in CSS pixels.
pub const SQUARE_VIEWPORT_PX: f64 = 400.0;

/// Wide (4:1) crop frame width, in CSS pixels.
pub const WIDE_VIEWPORT_WIDTH_PX: f64 = 720.0;

/// Wide (4:1) crop frame height, in CSS pixels.
pub const WIDE_VIEWPORT_HEIGHT_PX: f64 = 180.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Minimum zoom factor; the image is shown at its natural size.
pub const MIN_ZOOM: f64 = 1.0;

/// Maximum zoom factor.
pub const MAX_ZOOM: f64 = 4.0;

/// Zoom change applied by one click of the zoom buttons.
pub const ZOOM_STEP: f64 = 0.15;

// ── Pan ─────────────────────────────────────────────────────────

/// Offset change applied by one click of a directional nudge button.
pub const NUDGE_STEP_PX: f64 = 30.0;

// ── Output ──────────────────────────────────────────────────────

/// JPEG quality used when the caller asks for lossy output.
pub const JPEG_QUALITY: u8 = 90;
