//! Composer wizard: step state machine and draft reducer.
//!
//! DESIGN
//! ======
//! The host feeds user intent in as [`Action`]s and renders the returned
//! [`Effect`]s. Steps only move forward through category and transaction
//! selection; moving back discards the draft, so a non-empty draft parks the
//! transition behind a confirmation until `ConfirmDiscard` or
//! `CancelDiscard` arrives. Submission is split into `begin_submit` (guard,
//! validate, snapshot) and `finish_submit` (outcome of the async write) so
//! the reducer itself never awaits.

#[cfg(test)]
#[path = "wizard_test.rs"]
mod wizard_test;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::draft::{Draft, TextField};
use crate::images::ImageData;
use crate::pricing::{PricingChange, PricingError};
use crate::types::{CategoryType, Condition, FuelType, Period, TransactionKind};
use crate::validate::{ValidationReport, validate_draft};

/// Wizard position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    SelectCategory,
    SelectAdType,
    MainForm,
    Submitting,
    Success,
}

/// User intent delivered to [`Composer::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectCategory(CategoryType),
    SelectAdType(TransactionKind),
    Back,
    ConfirmDiscard,
    CancelDiscard,

    SetText(TextField, String),
    SetCondition(Option<Condition>),
    SetFuelType(Option<FuelType>),
    SetNegotiable(bool),
    SetHasMonthlyPayment(bool),
    SetHasDeposit(bool),
    SetShowFeatures(bool),
    SetActive(bool),
    SelectUserCategory(Option<Uuid>),

    AddFeature(String),
    RemoveFeature(usize),
    ToggleAmenity(String),
    SetAmenity(String, bool),

    SetStagingPeriod(Option<Period>),
    SetStagingPrice(String),
    AddPricingOption,
    RemovePricingOption(Uuid),
    SetDisplayPeriod(Period),

    AddImages(Vec<ImageData>),
    RemoveImage(usize),
    PromoteImage(usize),
}

/// Something the host should show or act on.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StepChanged { from: Step, to: Step },
    /// Ask the user before discarding the draft.
    ConfirmDiscard,
    /// Some selected files were not added: over capacity, or the form was
    /// no longer open when the read finished.
    ImagesDropped { accepted: usize, dropped: usize },
    /// The image list is already full.
    ImageLimitReached,
    PricingAdded(PricingChange),
    PricingRejected(PricingError),
    Submitted { advertisement_id: Uuid },
    SubmitFailed(String),
}

/// Why `begin_submit` refused to start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    #[error("a submission is already in progress")]
    AlreadySubmitting,
    #[error("the form is not open")]
    NotOnForm,
    #[error("the draft has {} invalid field(s)", .0.errors.len())]
    Invalid(ValidationReport),
}

#[derive(Debug, Clone)]
pub struct Composer {
    step: Step,
    draft: Draft,
    /// Backward target waiting on discard confirmation.
    pending_back: Option<Step>,
    reading_files: bool,
    submit_error: Option<String>,
    report: Option<ValidationReport>,
    current_year: i32,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_current_year(time::OffsetDateTime::now_utc().year())
    }

    #[must_use]
    pub fn with_current_year(current_year: i32) -> Self {
        Self {
            step: Step::SelectCategory,
            draft: Draft::default(),
            pending_back: None,
            reading_files: false,
            submit_error: None,
            report: None,
            current_year,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.step == Step::Submitting
    }

    #[must_use]
    pub fn awaiting_discard_confirmation(&self) -> bool {
        self.pending_back.is_some()
    }

    #[must_use]
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Report from the last blocked submit attempt.
    #[must_use]
    pub fn validation_report(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }

    /// Validate the current draft without changing state.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        validate_draft(&self.draft, self.current_year)
    }

    // --- Reducer ---

    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        // File reads finish asynchronously and always release the picker.
        let action = match action {
            Action::AddImages(images) => return self.receive_images(images),
            other => other,
        };

        if self.pending_back.is_some() {
            return match action {
                Action::ConfirmDiscard => self.confirm_discard(),
                Action::CancelDiscard => {
                    self.pending_back = None;
                    Vec::new()
                }
                _ => Vec::new(),
            };
        }

        match action {
            Action::SelectCategory(category) => self.select_category(category),
            Action::SelectAdType(kind) => self.select_ad_type(kind),
            Action::Back => self.back(),
            Action::ConfirmDiscard | Action::CancelDiscard => Vec::new(),
            edit => {
                if self.step != Step::MainForm {
                    return Vec::new();
                }
                self.report = None;
                self.edit(edit)
            }
        }
    }

    fn select_category(&mut self, category: CategoryType) -> Vec<Effect> {
        if self.step != Step::SelectCategory {
            return Vec::new();
        }
        self.draft = Draft::for_category(category);
        let to = if category.has_transaction_kind() { Step::SelectAdType } else { Step::MainForm };
        vec![self.transition(to)]
    }

    fn select_ad_type(&mut self, kind: TransactionKind) -> Vec<Effect> {
        if self.step != Step::SelectAdType || kind == TransactionKind::NotApplicable {
            return Vec::new();
        }
        self.draft.transaction = Some(kind);
        vec![self.transition(Step::MainForm)]
    }

    fn back(&mut self) -> Vec<Effect> {
        let target = match self.step {
            Step::MainForm if self.draft.category.is_some_and(CategoryType::has_transaction_kind) => {
                Step::SelectAdType
            }
            Step::MainForm | Step::SelectAdType => Step::SelectCategory,
            Step::SelectCategory | Step::Submitting | Step::Success => return Vec::new(),
        };
        if self.draft.has_user_content() {
            self.pending_back = Some(target);
            return vec![Effect::ConfirmDiscard];
        }
        self.go_back(target)
    }

    fn confirm_discard(&mut self) -> Vec<Effect> {
        match self.pending_back.take() {
            Some(target) => self.go_back(target),
            None => Vec::new(),
        }
    }

    fn go_back(&mut self, target: Step) -> Vec<Effect> {
        self.draft = match (target, self.draft.category) {
            (Step::SelectAdType, Some(category)) => Draft::for_category(category),
            _ => Draft::default(),
        };
        self.submit_error = None;
        self.report = None;
        self.reading_files = false;
        vec![self.transition(target)]
    }

    fn edit(&mut self, action: Action) -> Vec<Effect> {
        let draft = &mut self.draft;
        match action {
            Action::SetText(field, value) => draft.set_text(field, &value),
            Action::SetCondition(condition) => draft.condition = condition,
            Action::SetFuelType(fuel) => draft.fuel_type = fuel,
            Action::SetNegotiable(on) => draft.negotiable = on,
            Action::SetHasMonthlyPayment(on) => draft.has_monthly_payment = on,
            Action::SetHasDeposit(on) => draft.has_deposit = on,
            Action::SetShowFeatures(on) => draft.show_features = on,
            Action::SetActive(on) => draft.is_active = on,
            Action::SelectUserCategory(id) => draft.user_category = id,

            Action::AddFeature(label) => {
                draft.add_feature(&label);
            }
            Action::RemoveFeature(index) => {
                draft.remove_feature(index);
            }
            Action::ToggleAmenity(label) => draft.toggle_feature(&label),
            Action::SetAmenity(label, on) => draft.set_feature(&label, on),

            Action::SetStagingPeriod(period) => draft.pricing.set_staging_period(period),
            Action::SetStagingPrice(price) => draft.pricing.set_staging_price(price),
            Action::AddPricingOption => {
                return match draft.pricing.add() {
                    Ok(change) => vec![Effect::PricingAdded(change)],
                    Err(err) => vec![Effect::PricingRejected(err)],
                };
            }
            Action::RemovePricingOption(id) => {
                draft.pricing.remove(id);
            }
            Action::SetDisplayPeriod(period) => {
                draft.pricing.set_display_period(period);
            }

            Action::RemoveImage(index) => {
                draft.images.remove(index);
            }
            Action::PromoteImage(index) => {
                draft.images.promote(index);
            }

            Action::SelectCategory(_)
            | Action::SelectAdType(_)
            | Action::Back
            | Action::ConfirmDiscard
            | Action::CancelDiscard
            | Action::AddImages(_) => {}
        }
        Vec::new()
    }

    /// Images land on the open form, including one parked behind a discard
    /// confirmation. Anywhere else the whole batch is reported as dropped.
    fn receive_images(&mut self, images: Vec<ImageData>) -> Vec<Effect> {
        self.reading_files = false;
        if images.is_empty() {
            return Vec::new();
        }
        if self.step != Step::MainForm {
            debug!(step = ?self.step, dropped = images.len(), "images arrived off the form");
            return vec![Effect::ImagesDropped { accepted: 0, dropped: images.len() }];
        }
        self.report = None;
        let outcome = self.draft.images.add(images);
        debug!(accepted = outcome.accepted, dropped = outcome.dropped, total = self.draft.images.len(), "images added");
        match (outcome.accepted, outcome.dropped) {
            (_, 0) => Vec::new(),
            (0, _) => vec![Effect::ImageLimitReached],
            (accepted, dropped) => vec![Effect::ImagesDropped { accepted, dropped }],
        }
    }

    // --- File reads ---

    /// Claim the file picker. Returns the remaining image capacity, or
    /// `None` when a read is already running, the list is full, or the form
    /// is not open.
    pub fn begin_file_read(&mut self) -> Option<usize> {
        if self.reading_files || self.step != Step::MainForm || self.pending_back.is_some() {
            return None;
        }
        let remaining = self.draft.images.remaining();
        if remaining == 0 {
            return None;
        }
        self.reading_files = true;
        Some(remaining)
    }

    /// Release the file picker after a read that produced no images.
    pub fn end_file_read(&mut self) {
        self.reading_files = false;
    }

    #[must_use]
    pub fn is_reading_files(&self) -> bool {
        self.reading_files
    }

    // --- Submission ---

    /// Enter `Submitting` and hand back a snapshot of the draft to persist.
    ///
    /// # Errors
    ///
    /// Blocked when a submission is already running, the form is not open,
    /// or validation fails. On a validation failure the report is kept and
    /// the step stays `MainForm`.
    pub fn begin_submit(&mut self) -> Result<Draft, SubmitBlocked> {
        match self.step {
            Step::Submitting => return Err(SubmitBlocked::AlreadySubmitting),
            Step::MainForm if self.pending_back.is_none() => {}
            _ => return Err(SubmitBlocked::NotOnForm),
        }
        let report = self.validate();
        if !report.is_valid() {
            debug!(errors = ?report.errors, "submit blocked by validation");
            self.report = Some(report.clone());
            return Err(SubmitBlocked::Invalid(report));
        }
        self.report = None;
        self.submit_error = None;
        self.transition(Step::Submitting);
        Ok(self.draft.clone())
    }

    /// Record the outcome of the persistence call started by `begin_submit`.
    pub fn finish_submit(&mut self, outcome: Result<Uuid, String>) -> Vec<Effect> {
        if self.step != Step::Submitting {
            return Vec::new();
        }
        match outcome {
            Ok(advertisement_id) => {
                self.draft = Draft::default();
                let changed = self.transition(Step::Success);
                vec![changed, Effect::Submitted { advertisement_id }]
            }
            Err(message) => {
                self.submit_error = Some(message.clone());
                let changed = self.transition(Step::MainForm);
                vec![changed, Effect::SubmitFailed(message)]
            }
        }
    }

    fn transition(&mut self, to: Step) -> Effect {
        let from = self.step;
        self.step = to;
        debug!(?from, ?to, category = ?self.draft.category, "composer step changed");
        Effect::StepChanged { from, to }
    }
}
