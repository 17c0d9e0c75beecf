//! Submission service — validated draft → advertisement rows and objects.
//!
//! DESIGN
//! ======
//! Writes happen in a fixed order: the advertisement row, then every image
//! (uploaded concurrently, each followed by its image row), then feature
//! rows, then pricing rows for rentals. The first failure ends the run with
//! one [`SubmitError`]. Rows written before the failure stay in place; the
//! error log names the advertisement and the completed steps so they can be
//! cleaned up by hand.

use std::fmt;

use composer::draft::Draft;
use composer::images::ImageData;
use composer::record::{
    ADVERTISEMENTS_TABLE, FEATURES_TABLE, IMAGES_TABLE, ImageRecord, IncompleteDraft, PRICING_TABLE, Submission,
};
use composer::wizard::{Composer, Effect, SubmitBlocked};
use futures::future::try_join_all;
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::backend::{RecordStore, StoreError};
use crate::state::AppState;

// =============================================================================
// TYPES
// =============================================================================

/// Stage of the write sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStep {
    Identity,
    Office,
    Advertisement,
    Images,
    Features,
    Pricing,
}

impl fmt::Display for SubmitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Identity => "identity lookup",
            Self::Office => "office lookup",
            Self::Advertisement => "advertisement insert",
            Self::Images => "image upload",
            Self::Features => "feature insert",
            Self::Pricing => "pricing insert",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("submission blocked: {0}")]
    Blocked(#[from] SubmitBlocked),
    #[error("not signed in")]
    Unauthenticated,
    #[error("no office is linked to this account")]
    MissingOffice,
    #[error(transparent)]
    Incomplete(#[from] IncompleteDraft),
    #[error("row encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("{step} failed: {source}")]
    Store {
        step: SubmitStep,
        #[source]
        source: StoreError,
    },
}

impl SubmitError {
    fn store(step: SubmitStep) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { step, source }
    }

    /// Message shown to the user on the form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthenticated => "Please sign in again to publish this advertisement.".into(),
            Self::MissingOffice => "Create your office page before publishing advertisements.".into(),
            Self::Store { source, .. } if source.retryable() => {
                "The server could not be reached. Please try again.".into()
            }
            other => format!("Publishing failed: {other}"),
        }
    }
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Result of [`submit_draft`] together with the wizard effects it produced.
#[derive(Debug)]
#[must_use]
pub struct SubmitOutcome {
    pub result: Result<Uuid, SubmitError>,
    /// `StepChanged` plus `Submitted` or `SubmitFailed`; empty when blocked.
    pub effects: Vec<Effect>,
}

/// Validate and persist the composer's draft, driving it through
/// `Submitting` to `Success` or back to `MainForm`.
///
/// The result is [`SubmitError::Blocked`] without touching the backend when
/// a submission is already running or the draft is invalid; otherwise the
/// first failing write.
pub async fn submit_draft(state: &AppState, composer: &mut Composer) -> SubmitOutcome {
    let draft = match composer.begin_submit() {
        Ok(draft) => draft,
        Err(blocked) => return SubmitOutcome { result: Err(blocked.into()), effects: Vec::new() },
    };
    let result = persist(state, &draft).await;
    let effects = match &result {
        Ok(id) => composer.finish_submit(Ok(*id)),
        Err(e) => composer.finish_submit(Err(e.user_message())),
    };
    SubmitOutcome { result, effects }
}

/// Write a validated draft. Exposed for callers that manage the wizard state
/// themselves.
///
/// # Errors
///
/// See [`submit_draft`].
pub async fn persist(state: &AppState, draft: &Draft) -> Result<Uuid, SubmitError> {
    let user = state
        .identity
        .current_user()
        .await
        .map_err(SubmitError::store(SubmitStep::Identity))?
        .ok_or(SubmitError::Unauthenticated)?;
    let office = state
        .offices
        .current_office(&user)
        .await
        .map_err(SubmitError::store(SubmitStep::Office))?
        .ok_or(SubmitError::MissingOffice)?;

    let submission = Submission::project(draft, office.id, Uuid::new_v4())?;
    let ad_id = submission.id();

    insert_row(state.records.as_ref(), ADVERTISEMENTS_TABLE, &submission.advertisement)
        .await
        .map_err(|e| e.at(SubmitStep::Advertisement))?;
    info!(ad_id = %ad_id, office_id = %office.id, category = %submission.advertisement.category_type, "advertisement inserted");

    let mut completed = vec![SubmitStep::Advertisement];
    if let Err(e) = write_children(state, &submission, office.id, &mut completed).await {
        error!(ad_id = %ad_id, completed = ?completed, error = %e, "submission failed after partial write; rows left in place");
        return Err(e);
    }

    info!(
        ad_id = %ad_id,
        images = submission.images.len(),
        features = submission.features.len(),
        pricing = submission.pricing.len(),
        "advertisement published"
    );
    Ok(ad_id)
}

async fn write_children(
    state: &AppState,
    submission: &Submission,
    office_id: Uuid,
    completed: &mut Vec<SubmitStep>,
) -> Result<(), SubmitError> {
    let ad_id = submission.id();

    let uploads = submission
        .images
        .iter()
        .enumerate()
        .map(|(index, image)| store_image(state, office_id, ad_id, index, image));
    try_join_all(uploads).await?;
    completed.push(SubmitStep::Images);

    for row in submission.feature_records() {
        insert_row(state.records.as_ref(), FEATURES_TABLE, &row)
            .await
            .map_err(|e| e.at(SubmitStep::Features))?;
    }
    completed.push(SubmitStep::Features);

    for row in submission.pricing_records() {
        insert_row(state.records.as_ref(), PRICING_TABLE, &row)
            .await
            .map_err(|e| e.at(SubmitStep::Pricing))?;
    }
    completed.push(SubmitStep::Pricing);
    Ok(())
}

async fn store_image(
    state: &AppState,
    office_id: Uuid,
    ad_id: Uuid,
    index: usize,
    image: &ImageData,
) -> Result<(), SubmitError> {
    let path = storage_path(office_id, ad_id, unix_millis(), rand::random::<u32>(), image.extension());
    state
        .objects
        .upload(&path, image.mime(), image.bytes().to_vec())
        .await
        .map_err(SubmitError::store(SubmitStep::Images))?;

    let row = ImageRecord::new(ad_id, state.objects.public_url(&path), index);
    insert_row(state.records.as_ref(), IMAGES_TABLE, &row)
        .await
        .map_err(|e| e.at(SubmitStep::Images))?;
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

/// Failure of a single row insert before it is tied to a step.
enum RowError {
    Encode(serde_json::Error),
    Store(StoreError),
}

impl RowError {
    fn at(self, step: SubmitStep) -> SubmitError {
        match self {
            Self::Encode(e) => SubmitError::Encode(e),
            Self::Store(source) => SubmitError::Store { step, source },
        }
    }
}

async fn insert_row<T: Serialize>(records: &dyn RecordStore, table: &str, row: &T) -> Result<(), RowError> {
    let value = serde_json::to_value(row).map_err(RowError::Encode)?;
    records.insert(table, value).await.map_err(RowError::Store)?;
    Ok(())
}

/// `{office}/{advertisement}/{unix_ms}-{nonce}.{ext}`
#[must_use]
pub fn storage_path(office_id: Uuid, ad_id: Uuid, unix_ms: i128, nonce: u32, extension: &str) -> String {
    format!("{office_id}/{ad_id}/{unix_ms}-{nonce:08x}.{extension}")
}

fn unix_millis() -> i128 {
    time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
}

#[cfg(test)]
#[path = "submission_test.rs"]
mod tests;
