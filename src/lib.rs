//! Adboard — advertisement publishing for office dashboards.
//!
//! The [`composer`] crate owns the listing wizard and the [`cropper`] crate
//! owns branded-image cropping; this crate connects both to the hosted
//! backend.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`backend`] | Collaborator traits and the hosted backend client |
//! | [`services::submission`] | Draft → advertisement, image, feature, and pricing rows |
//! | [`services::uploads`] | Crop widgets and image file reads |
//! | [`services::categories`] | Office-defined category lookup |
//! | [`import`] | JSON listing replay for the `adboard-import` binary |
//! | [`config`] | Environment configuration |
//! | [`state`] | Shared collaborator handles |

pub mod backend;
pub mod config;
pub mod import;
pub mod services;
pub mod state;
