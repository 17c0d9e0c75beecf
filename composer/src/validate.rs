//! Draft validation.
//!
//! Every applicable rule runs on every call; the report lists all offending
//! fields at once so the form can highlight them together.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::consts::{MAX_IMAGES, MIN_VEHICLE_YEAR, TITLE_MAX_CHARS};
use crate::draft::{Draft, TextField};
use crate::numerals::{parse_amount, parse_whole};
use crate::rules::{Field, FieldSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: BTreeSet<Field>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn has_error(&self, field: Field) -> bool {
        self.errors.contains(&field)
    }

    fn flag(&mut self, field: Field) {
        self.errors.insert(field);
    }
}

/// Numeric inputs that must be strictly positive when present.
const POSITIVE_AMOUNTS: &[TextField] = &[TextField::Price, TextField::MonthlyPayment];
/// Numeric inputs that may be zero.
const NON_NEGATIVE_AMOUNTS: &[TextField] = &[TextField::Kilometers, TextField::Deposit, TextField::KmLimit, TextField::Area];

/// Validate `draft` against the field set its category and toggles select.
/// `current_year` bounds the model year from above (`current_year + 1`).
#[must_use]
pub fn validate_draft(draft: &Draft, current_year: i32) -> ValidationReport {
    let set = FieldSet::for_draft(draft);
    let mut report = ValidationReport::default();

    for field in TextField::ALL {
        let key = Field::from(*field);
        if set.is_required(key) && draft.text(*field).trim().is_empty() {
            report.flag(key);
        }
    }

    if draft.category.is_none() {
        report.flag(Field::CategoryType);
    }
    if set.is_required(Field::AdType) && draft.transaction.is_none() {
        report.flag(Field::AdType);
    }
    if set.is_required(Field::Condition) && draft.condition.is_none() {
        report.flag(Field::Condition);
    }
    if set.is_required(Field::FuelType) && draft.fuel_type.is_none() {
        report.flag(Field::FuelType);
    }

    let images = draft.images.len();
    if images == 0 || images > MAX_IMAGES {
        report.flag(Field::Images);
    }

    if set.pricing_required && !draft.pricing.has_valid_option() {
        report.flag(Field::PricingOptions);
    }

    check_formats(draft, &set, current_year, &mut report);
    report
}

/// Format rules for inputs that are visible and non-empty.
fn check_formats(draft: &Draft, set: &FieldSet, current_year: i32, report: &mut ValidationReport) {
    let present = |field: TextField| {
        let raw = draft.text(field).trim();
        (set.is_visible(Field::from(field)) && !raw.is_empty()).then_some(raw)
    };

    if draft.title.chars().count() > TITLE_MAX_CHARS {
        report.flag(Field::Title);
    }

    if let Some(raw) = present(TextField::Year) {
        let max = i64::from(current_year) + 1;
        let in_range = parse_whole(raw).is_some_and(|y| (i64::from(MIN_VEHICLE_YEAR)..=max).contains(&y));
        if !in_range {
            report.flag(Field::Year);
        }
    }

    for field in POSITIVE_AMOUNTS {
        let bad = present(*field).is_some_and(|raw| !parse_amount(raw).is_some_and(|v| v > 0.0));
        if bad {
            report.flag(Field::from(*field));
        }
    }
    for field in NON_NEGATIVE_AMOUNTS {
        let bad = present(*field).is_some_and(|raw| !parse_amount(raw).is_some_and(|v| v >= 0.0));
        if bad {
            report.flag(Field::from(*field));
        }
    }

    if set.is_visible(Field::DisplayPeriod)
        && !draft.pricing.options().is_empty()
        && draft.pricing.display_option().is_none()
    {
        report.flag(Field::DisplayPeriod);
    }
}
