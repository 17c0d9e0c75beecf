//! Crop session: zoom/offset state for one cropper invocation.
//!
//! The session never touches pixels. It tracks how the source image is
//! projected into the fixed viewport (`zoom` and `offset`), keeps that
//! projection clamped so the crop frame is always covered by image content,
//! and derives the source rectangle that a commit rasterizes.
//!
//! Offsets are in viewport (CSS pixel) space. The image is displayed at
//! `natural * zoom`, so the valid offset range on each axis is
//! `[viewport - natural * zoom, 0]`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    MAX_ZOOM, MIN_ZOOM, NUDGE_STEP_PX, SQUARE_VIEWPORT_PX, WIDE_VIEWPORT_HEIGHT_PX, WIDE_VIEWPORT_WIDTH_PX,
    ZOOM_STEP,
};
use crate::geometry::{Point, Rect, Size};

/// Target aspect class for the crop frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectMode {
    /// 400×400 frame, used for logos and category images.
    #[default]
    Square,
    /// 720×180 (4:1) frame, used for cover banners.
    Wide,
}

impl AspectMode {
    /// Fixed viewport size for this aspect class.
    #[must_use]
    pub fn viewport(self) -> Size {
        match self {
            Self::Square => Size::new(SQUARE_VIEWPORT_PX, SQUARE_VIEWPORT_PX),
            Self::Wide => Size::new(WIDE_VIEWPORT_WIDTH_PX, WIDE_VIEWPORT_HEIGHT_PX),
        }
    }
}

/// Direction of a nudge button. Moves the image, not the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> Point {
        match self {
            Self::Up => Point::new(0.0, -NUDGE_STEP_PX),
            Self::Down => Point::new(0.0, NUDGE_STEP_PX),
            Self::Left => Point::new(-NUDGE_STEP_PX, 0.0),
            Self::Right => Point::new(NUDGE_STEP_PX, 0.0),
        }
    }
}

/// Pan/zoom state for a single crop invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropSession {
    natural: Size,
    aspect: AspectMode,
    zoom: f64,
    offset: Point,
}

impl CropSession {
    /// Start a session for a source image of `natural` size.
    #[must_use]
    pub fn new(natural: Size, aspect: AspectMode) -> Self {
        let mut session = Self { natural, aspect, zoom: MIN_ZOOM, offset: Point::default() };
        session.clamp_offset();
        session
    }

    // --- Queries ---

    #[must_use]
    pub fn aspect(&self) -> AspectMode {
        self.aspect
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.aspect.viewport()
    }

    #[must_use]
    pub fn natural(&self) -> Size {
        self.natural
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Size of the image as displayed at the current zoom.
    #[must_use]
    pub fn display_size(&self) -> Size {
        self.natural.scaled(self.zoom)
    }

    /// Inclusive `(min, max)` offset bounds per axis, as `(x_bounds, y_bounds)`.
    ///
    /// `min` exceeds `max` when the displayed image is narrower (or shorter)
    /// than the viewport; such an axis is pinned to 0.
    #[must_use]
    pub fn offset_bounds(&self) -> ((f64, f64), (f64, f64)) {
        let viewport = self.viewport();
        let display = self.display_size();
        ((viewport.width - display.width, 0.0), (viewport.height - display.height, 0.0))
    }

    // --- Mutations ---

    /// Replace the source image. Zoom is kept; the offset is re-clamped.
    pub fn load_image(&mut self, natural: Size) {
        self.natural = natural;
        self.clamp_offset();
    }

    /// Set zoom, clamped to `[MIN_ZOOM, MAX_ZOOM]`. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.clamp_offset();
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Translate the image by a viewport-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.offset.x += dx;
        self.offset.y += dy;
        self.clamp_offset();
    }

    /// Move the image one nudge step in `direction`.
    pub fn nudge(&mut self, direction: Direction) {
        let d = direction.delta();
        self.pan_by(d.x, d.y);
    }

    /// Back to zoom 1 with the image anchored at the top-left corner.
    pub fn reset(&mut self) {
        self.zoom = MIN_ZOOM;
        self.offset = Point::default();
        self.clamp_offset();
    }

    fn clamp_offset(&mut self) {
        let ((min_x, max_x), (min_y, max_y)) = self.offset_bounds();
        self.offset.x = clamp_axis(self.offset.x, min_x, max_x);
        self.offset.y = clamp_axis(self.offset.y, min_y, max_y);
    }

    // --- Commit math ---

    /// Source-image rectangle (native pixels) that the viewport currently shows.
    ///
    /// The rectangle is derived in two stages: first into displayed space
    /// (`viewport / zoom`, origin `-offset / zoom`), then scaled by
    /// `natural.width / displayed.width` into native pixels. Width and height
    /// divide by `zoom` once more after scaling.
    #[must_use]
    pub fn source_rect(&self) -> Rect {
        let viewport = self.viewport();
        let disp_w = viewport.width / self.zoom;
        let top_left = Point::new(-self.offset.x / self.zoom, -self.offset.y / self.zoom);
        let scale = self.natural.width / disp_w;
        Rect {
            x: top_left.x * scale,
            y: top_left.y * scale,
            width: viewport.width * scale / self.zoom,
            height: viewport.height * scale / self.zoom,
        }
    }
}

fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    if min > max || !value.is_finite() {
        return max;
    }
    value.clamp(min, max)
}
