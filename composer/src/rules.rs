//! Which fields a draft shows and requires.
//!
//! DESIGN
//! ======
//! Visibility is a pure function of `(category, transaction)` plus a few
//! draft toggles (`has_monthly_payment`, `has_deposit`, `show_features`).
//! Rendering, validation, and record projection all read the same
//! [`FieldSet`], so a hidden field is never validated and never submitted.

#[cfg(test)]
#[path = "rules_test.rs"]
mod rules_test;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::draft::{Draft, TextField};
use crate::types::{CategoryType, TransactionKind};

/// Every addressable input on the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    CategoryType,
    AdType,
    UserCategory,
    Title,
    Description,
    Price,
    Negotiable,
    HasMonthlyPayment,
    MonthlyPayment,
    Manufacturer,
    Model,
    Kilometers,
    Condition,
    Import,
    GearType,
    Color,
    InteriorColor,
    Year,
    FuelType,
    BodyType,
    EngineSize,
    KmLimit,
    HasDeposit,
    Deposit,
    PricingOptions,
    DisplayPeriod,
    PropertyType,
    Area,
    ShowFeatures,
    Features,
    Images,
    IsActive,
}

impl From<TextField> for Field {
    fn from(field: TextField) -> Self {
        match field {
            TextField::Title => Self::Title,
            TextField::Description => Self::Description,
            TextField::Price => Self::Price,
            TextField::MonthlyPayment => Self::MonthlyPayment,
            TextField::Manufacturer => Self::Manufacturer,
            TextField::Model => Self::Model,
            TextField::Kilometers => Self::Kilometers,
            TextField::Import => Self::Import,
            TextField::GearType => Self::GearType,
            TextField::Color => Self::Color,
            TextField::InteriorColor => Self::InteriorColor,
            TextField::Year => Self::Year,
            TextField::BodyType => Self::BodyType,
            TextField::EngineSize => Self::EngineSize,
            TextField::Deposit => Self::Deposit,
            TextField::KmLimit => Self::KmLimit,
            TextField::PropertyType => Self::PropertyType,
            TextField::Area => Self::Area,
        }
    }
}

/// How the features list is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureMode {
    /// User-typed labels.
    FreeList,
    /// Predefined amenities plus custom labels, gated by `show_features`.
    AmenityChecklist,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    pub visible: BTreeSet<Field>,
    pub required: BTreeSet<Field>,
    /// At least one valid pricing option must be committed.
    pub pricing_required: bool,
    pub feature_mode: FeatureMode,
}

const BASE_VISIBLE: &[Field] = &[Field::CategoryType, Field::Title, Field::Description, Field::Images, Field::IsActive];
const BASE_REQUIRED: &[Field] = &[Field::CategoryType, Field::Title, Field::Images];

const VEHICLE_COMMON: &[Field] = &[
    Field::AdType,
    Field::UserCategory,
    Field::Year,
    Field::FuelType,
    Field::BodyType,
    Field::EngineSize,
    Field::Features,
];
const VEHICLE_SALE: &[Field] = &[
    Field::Price,
    Field::Negotiable,
    Field::HasMonthlyPayment,
    Field::MonthlyPayment,
    Field::Manufacturer,
    Field::Model,
    Field::Kilometers,
    Field::Condition,
    Field::Import,
    Field::GearType,
    Field::Color,
    Field::InteriorColor,
];
const VEHICLE_RENT: &[Field] = &[Field::PricingOptions, Field::DisplayPeriod, Field::Deposit, Field::KmLimit];

const REAL_ESTATE_COMMON: &[Field] =
    &[Field::AdType, Field::UserCategory, Field::PropertyType, Field::Area, Field::ShowFeatures, Field::Features];
const REAL_ESTATE_RENT: &[Field] = &[Field::PricingOptions, Field::DisplayPeriod, Field::HasDeposit, Field::Deposit];

const OTHERS: &[Field] = &[Field::Price, Field::Features];

impl FieldSet {
    /// Static descriptor for a category and transaction kind. A missing
    /// transaction kind yields only the category-common fields.
    #[must_use]
    pub fn for_kind(category: Option<CategoryType>, transaction: Option<TransactionKind>) -> Self {
        let mut set = Self {
            visible: BASE_VISIBLE.iter().copied().collect(),
            required: BASE_REQUIRED.iter().copied().collect(),
            pricing_required: false,
            feature_mode: FeatureMode::FreeList,
        };

        match (category, transaction) {
            (Some(CategoryType::Vehicles), kind) => {
                set.show(VEHICLE_COMMON);
                set.require(&[Field::AdType, Field::Year, Field::FuelType]);
                match kind {
                    Some(TransactionKind::Sale) => {
                        set.show(VEHICLE_SALE);
                        set.require(&[Field::Condition, Field::Kilometers, Field::Price]);
                    }
                    Some(TransactionKind::Rent) => {
                        set.show(VEHICLE_RENT);
                        set.pricing_required = true;
                    }
                    Some(TransactionKind::NotApplicable) | None => {}
                }
            }
            (Some(CategoryType::RealEstate), kind) => {
                set.feature_mode = FeatureMode::AmenityChecklist;
                set.show(REAL_ESTATE_COMMON);
                set.require(&[Field::AdType]);
                match kind {
                    Some(TransactionKind::Sale) => {
                        set.show(&[Field::Price]);
                        set.require(&[Field::Price]);
                    }
                    Some(TransactionKind::Rent) => {
                        set.show(REAL_ESTATE_RENT);
                        set.pricing_required = true;
                    }
                    Some(TransactionKind::NotApplicable) | None => {}
                }
            }
            (Some(CategoryType::Others), _) => {
                set.show(OTHERS);
                set.require(&[Field::Price]);
            }
            (None, _) => {}
        }
        set
    }

    /// Descriptor for a live draft, applying its toggles.
    #[must_use]
    pub fn for_draft(draft: &Draft) -> Self {
        let mut set = Self::for_kind(draft.category, draft.transaction);

        if set.is_visible(Field::MonthlyPayment) {
            if draft.has_monthly_payment {
                set.required.insert(Field::MonthlyPayment);
            } else {
                set.visible.remove(&Field::MonthlyPayment);
            }
        }
        if set.is_visible(Field::HasDeposit) && !draft.has_deposit {
            set.visible.remove(&Field::Deposit);
        }
        if set.feature_mode == FeatureMode::AmenityChecklist && !draft.show_features {
            set.visible.remove(&Field::Features);
        }
        set
    }

    #[must_use]
    pub fn is_visible(&self, field: Field) -> bool {
        self.visible.contains(&field)
    }

    #[must_use]
    pub fn is_required(&self, field: Field) -> bool {
        self.required.contains(&field)
    }

    fn show(&mut self, fields: &[Field]) {
        self.visible.extend(fields.iter().copied());
    }

    fn require(&mut self, fields: &[Field]) {
        self.required.extend(fields.iter().copied());
    }
}
