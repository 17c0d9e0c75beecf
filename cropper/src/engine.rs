use image::{DynamicImage, GenericImageView};
use tracing::{debug, warn};

use crate::geometry::{Point, Size};
use crate::input::{Button, InputState, PointerSource, single_touch};
use crate::raster::{self, CroppedImage, OutputFormat};
use crate::session::{AspectMode, CropSession, Direction};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Cursor shown over the crop frame while idle.
const CURSOR_GRAB: &str = "grab";
/// Cursor shown while the image is being dragged.
const CURSOR_GRABBING: &str = "grabbing";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetCursor(String),
    RenderNeeded,
}

/// Event-driven cropper state for one invocation.
///
/// Owns the crop session and the gesture state. Consumed by [`CropperCore::commit`]
/// or [`CropperCore::cancel`], so a session can produce at most one output.
#[derive(Debug, Clone)]
pub struct CropperCore {
    pub session: CropSession,
    pub input: InputState,
    pub format: OutputFormat,
}

impl CropperCore {
    #[must_use]
    pub fn new(natural: Size, aspect: AspectMode) -> Self {
        Self { session: CropSession::new(natural, aspect), input: InputState::Idle, format: OutputFormat::default() }
    }

    /// Start a session sized to a decoded source image.
    #[must_use]
    pub fn for_image(source: &DynamicImage, aspect: AspectMode) -> Self {
        let (w, h) = source.dimensions();
        Self::new(Size::from_pixels(w, h), aspect)
    }

    /// Choose the encoding used on commit.
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Swap in a newly loaded source image, keeping zoom.
    pub fn load_image(&mut self, natural: Size) -> Vec<Action> {
        self.session.load_image(natural);
        self.input = InputState::Idle;
        vec![Action::RenderNeeded]
    }

    // --- Mouse ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.input = InputState::Panning { last_screen: screen_pt, source: PointerSource::Mouse };
        vec![Action::SetCursor(CURSOR_GRABBING.into())]
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.drag_to(screen_pt, PointerSource::Mouse)
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.end_drag(PointerSource::Mouse)
    }

    /// The pointer left the crop frame; treated as a release.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_drag(PointerSource::Mouse)
    }

    // --- Touch ---

    pub fn on_touch_start(&mut self, touches: &[Point]) -> Vec<Action> {
        let Some(pt) = single_touch(touches) else {
            return Vec::new();
        };
        self.input = InputState::Panning { last_screen: pt, source: PointerSource::Touch };
        Vec::new()
    }

    pub fn on_touch_move(&mut self, touches: &[Point]) -> Vec<Action> {
        let Some(pt) = single_touch(touches) else {
            return Vec::new();
        };
        self.drag_to(pt, PointerSource::Touch)
    }

    pub fn on_touch_end(&mut self) -> Vec<Action> {
        self.end_drag(PointerSource::Touch)
    }

    // --- Buttons ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.session.zoom_in();
        vec![Action::RenderNeeded]
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.session.zoom_out();
        vec![Action::RenderNeeded]
    }

    pub fn nudge(&mut self, direction: Direction) -> Vec<Action> {
        self.session.nudge(direction);
        vec![Action::RenderNeeded]
    }

    pub fn reset(&mut self) -> Vec<Action> {
        self.session.reset();
        vec![Action::RenderNeeded]
    }

    // --- Commit ---

    /// Rasterize the visible region and end the session.
    ///
    /// Returns `None` (after logging) when the output surface cannot be
    /// acquired or the encoder fails; no partial image is ever returned.
    #[must_use]
    pub fn commit(self, source: &DynamicImage) -> Option<CroppedImage> {
        let rect = self.session.source_rect();
        let viewport = self.session.viewport();
        debug!(zoom = self.session.zoom(), x = rect.x, y = rect.y, w = rect.width, h = rect.height, "crop commit");

        let Some(surface) = raster::rasterize(source, rect, viewport) else {
            warn!(width = viewport.width, height = viewport.height, "crop surface unavailable; commit skipped");
            return None;
        };
        match raster::encode(surface, self.format) {
            Ok(cropped) => Some(cropped),
            Err(e) => {
                warn!(error = %e, "crop encode failed; commit skipped");
                None
            }
        }
    }

    /// Discard the session without producing output.
    pub fn cancel(self) {
        debug!(zoom = self.session.zoom(), "crop cancelled");
    }

    // --- Internals ---

    fn drag_to(&mut self, screen_pt: Point, from: PointerSource) -> Vec<Action> {
        let InputState::Panning { last_screen, source } = self.input else {
            return Vec::new();
        };
        if source != from {
            return Vec::new();
        }
        let delta = screen_pt.delta_from(last_screen);
        self.session.pan_by(delta.x, delta.y);
        self.input = InputState::Panning { last_screen: screen_pt, source };
        vec![Action::RenderNeeded]
    }

    fn end_drag(&mut self, from: PointerSource) -> Vec<Action> {
        match self.input {
            InputState::Panning { source, .. } if source == from => {
                self.input = InputState::Idle;
                vec![Action::SetCursor(CURSOR_GRAB.into())]
            }
            _ => Vec::new(),
        }
    }
}
