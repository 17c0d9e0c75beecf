//! Listing import — replay a JSON listing through the composer and publish it.
//!
//! DESIGN
//! ======
//! A listing file describes the same inputs a user would enter on the form.
//! [`replay`] feeds them to the composer as actions, so the import path runs
//! through exactly the same rules, normalization, and validation as the
//! interactive one. Image paths resolve relative to the listing file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use composer::consts::MAX_IMAGES;
use composer::draft::TextField;
use composer::images::ImageData;
use composer::pricing::PricingError;
use composer::types::{CategoryType, Condition, FuelType, Period, TransactionKind};
use composer::validate::ValidationReport;
use composer::wizard::{Action, Composer, Effect, Step};
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::services::submission::{SubmitError, submit_draft};
use crate::services::uploads::{UploadError, read_image_files};
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("listing is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0} listings need an adType of sale or rent")]
    MissingAdType(CategoryType),
    #[error("listing stopped at step {0:?}")]
    Stalled(Step),
    #[error("{period} price rejected: {source}")]
    Pricing {
        period: Period,
        #[source]
        source: PricingError,
    },
    #[error("image read failed: {0}")]
    Images(#[from] UploadError),
    #[error("listing is invalid: {}", describe(.0))]
    Invalid(ValidationReport),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

fn describe(report: &ValidationReport) -> String {
    report.errors.iter().map(|field| format!("{field:?}")).collect::<Vec<_>>().join(", ")
}

/// One pricing row in a listing file.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPrice {
    pub period: Period,
    pub price: String,
}

/// Form inputs for one advertisement.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub category: CategoryType,
    #[serde(default)]
    pub ad_type: Option<TransactionKind>,
    #[serde(default)]
    pub user_category: Option<Uuid>,
    #[serde(default)]
    pub fields: HashMap<TextField, String>,
    #[serde(default)]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub fuel_type: Option<FuelType>,
    #[serde(default)]
    pub negotiable: bool,
    #[serde(default)]
    pub has_monthly_payment: bool,
    #[serde(default)]
    pub has_deposit: bool,
    #[serde(default)]
    pub show_features: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub pricing: Vec<ListingPrice>,
    #[serde(default)]
    pub display_period: Option<Period>,
    #[serde(default)]
    pub images: Vec<PathBuf>,
}

fn default_active() -> bool {
    true
}

impl Listing {
    /// Parse a listing document.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed JSON or unknown enum values.
    pub fn from_json(text: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Image paths, resolved against `base`.
    #[must_use]
    pub fn image_paths(&self, base: &Path) -> Vec<PathBuf> {
        self.images.iter().map(|p| base.join(p)).collect()
    }
}

/// Feed `listing` into a fresh `composer`, ending on the main form.
///
/// # Errors
///
/// Fails when the listing cannot reach the main form or a pricing row is
/// rejected.
pub fn replay(listing: &Listing, composer: &mut Composer, images: Vec<ImageData>) -> Result<(), ImportError> {
    composer.dispatch(Action::SelectCategory(listing.category));
    if listing.category.has_transaction_kind() {
        let kind = listing.ad_type.ok_or(ImportError::MissingAdType(listing.category))?;
        composer.dispatch(Action::SelectAdType(kind));
    }
    if composer.step() != Step::MainForm {
        return Err(ImportError::Stalled(composer.step()));
    }

    let mut actions = vec![
        Action::SelectUserCategory(listing.user_category),
        Action::SetCondition(listing.condition),
        Action::SetFuelType(listing.fuel_type),
        Action::SetNegotiable(listing.negotiable),
        Action::SetHasMonthlyPayment(listing.has_monthly_payment),
        Action::SetHasDeposit(listing.has_deposit),
        Action::SetShowFeatures(listing.show_features),
        Action::SetActive(listing.is_active),
    ];
    actions.extend(listing.fields.iter().map(|(field, value)| Action::SetText(*field, value.clone())));
    actions.extend(listing.features.iter().cloned().map(Action::AddFeature));
    actions.extend(listing.amenities.iter().map(|label| Action::SetAmenity(label.clone(), true)));
    for action in actions {
        composer.dispatch(action);
    }

    for row in &listing.pricing {
        composer.dispatch(Action::SetStagingPeriod(Some(row.period)));
        composer.dispatch(Action::SetStagingPrice(row.price.clone()));
        for effect in composer.dispatch(Action::AddPricingOption) {
            if let Effect::PricingRejected(source) = effect {
                return Err(ImportError::Pricing { period: row.period, source });
            }
        }
    }
    if let Some(period) = listing.display_period {
        composer.dispatch(Action::SetDisplayPeriod(period));
    }

    for effect in composer.dispatch(Action::AddImages(images)) {
        if let Effect::ImagesDropped { dropped, .. } = effect {
            warn!(dropped, "listing has more images than allowed");
        }
    }
    Ok(())
}

/// Read, replay, validate, and (unless `dry_run`) publish a listing file.
/// Returns the new advertisement id, or `None` for a dry run.
///
/// # Errors
///
/// Any read, replay, validation, or submission failure.
pub async fn import_listing(state: Option<&AppState>, path: &Path, dry_run: bool) -> Result<Option<Uuid>, ImportError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ImportError::Read { path: path.to_path_buf(), source })?;
    let listing = Listing::from_json(&text)?;

    let mut composer = Composer::new();
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let paths = listing.image_paths(base);
    let images = read_image_files(&paths, MAX_IMAGES).await?;
    replay(&listing, &mut composer, images)?;

    let report = composer.validate();
    if !report.is_valid() {
        return Err(ImportError::Invalid(report));
    }
    let Some(state) = state.filter(|_| !dry_run) else {
        info!(path = %path.display(), "listing is valid; dry run, nothing published");
        return Ok(None);
    };

    let outcome = submit_draft(state, &mut composer).await;
    debug!(effects = ?outcome.effects, "composer settled");
    let id = outcome.result?;
    info!(path = %path.display(), ad_id = %id, "listing published");
    Ok(Some(id))
}

#[cfg(test)]
#[path = "import_test.rs"]
mod tests;
