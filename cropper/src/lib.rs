//! Interactive image cropper for logo, cover, and category uploads.
//!
//! A crop session projects a decoded source image into a fixed-size viewport,
//! lets the user pan (pointer or single-finger touch drag, directional nudge)
//! and zoom (stepped buttons), and finally rasterizes the visible region to an
//! output image exactly the size of the viewport. The host layer wires DOM
//! events into [`engine::CropperCore`] and receives [`engine::Action`]s back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Event-driven cropper core and the one-shot commit |
//! | [`session`] | Zoom/offset state, clamping, and source-rectangle math |
//! | [`input`] | Pointer/touch event types and the pan gesture state machine |
//! | [`raster`] | Output surface, sampling, and encoding |
//! | [`geometry`] | Points, sizes, and rectangles |
//! | [`consts`] | Viewport sizes, zoom limits, and step sizes |

pub mod consts;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod raster;
pub mod session;
