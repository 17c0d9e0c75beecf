//! Advertisement composer: the wizard that builds one listing draft.
//!
//! The composer walks an office owner through category selection, the
//! sale/rent choice, and a category-specific form, then hands a validated
//! snapshot to the persistence layer. Everything here is synchronous and
//! side-effect free; file reads and network calls live in the host crate and
//! feed results back in as [`wizard::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`wizard`] | Step state machine and the draft reducer |
//! | [`draft`] | The mutable draft record and its text fields |
//! | [`rules`] | Field-set descriptor per category × transaction kind |
//! | [`validate`] | Non short-circuiting draft validation |
//! | [`pricing`] | Rental pricing options and the staging editor |
//! | [`images`] | Image payloads, data URIs, and the bounded image list |
//! | [`record`] | Projection of a draft into persistence rows |
//! | [`numerals`] | Digit transliteration and lenient number parsing |
//! | [`types`] | Category, transaction, period, and other enumerations |
//! | [`consts`] | Limits and predefined amenity labels |

pub mod consts;
pub mod draft;
pub mod images;
pub mod numerals;
pub mod pricing;
pub mod record;
pub mod rules;
pub mod types;
pub mod validate;
pub mod wizard;
