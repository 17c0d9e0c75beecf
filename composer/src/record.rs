//! Projection of a validated draft into persistence rows.
//!
//! DESIGN
//! ======
//! Every column the record store receives is derived from the draft's
//! [`FieldSet`]: a field that is not visible for the draft's category,
//! transaction kind, and toggles is serialized as `null`. Stale input typed
//! before a category or toggle change therefore never reaches storage.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::draft::{Draft, TextField};
use crate::images::ImageData;
use crate::numerals::{parse_amount, parse_whole};
use crate::rules::{Field, FieldSet};
use crate::types::{CategoryType, Condition, FuelType, Period, TransactionKind};

// =============================================================================
// TABLES
// =============================================================================

pub const ADVERTISEMENTS_TABLE: &str = "advertisements";
pub const IMAGES_TABLE: &str = "advertisement_images";
pub const FEATURES_TABLE: &str = "advertisement_features";
pub const PRICING_TABLE: &str = "advertisement_pricing_options";

// =============================================================================
// ROWS
// =============================================================================

/// Row for the `advertisements` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvertisementRecord {
    pub id: Uuid,
    pub office_id: Uuid,
    pub category_type: CategoryType,
    /// `sale`, `rent`, or `others` for listings without a transaction kind.
    pub ad_type: String,
    pub category_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub negotiable: Option<bool>,
    pub has_monthly_payment: Option<bool>,
    pub monthly_payment: Option<f64>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub kilometers: Option<f64>,
    pub condition: Option<Condition>,
    pub import: Option<String>,
    pub gear_type: Option<String>,
    pub color: Option<String>,
    pub interior_color: Option<String>,
    pub year: Option<i64>,
    pub fuel_type: Option<FuelType>,
    pub body_type: Option<String>,
    pub engine_size: Option<String>,
    pub km_limit: Option<f64>,
    pub deposit: Option<f64>,
    pub property_type: Option<String>,
    pub area: Option<f64>,
    pub display_period: Option<Period>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub advertisement_id: Uuid,
    pub image_url: String,
    pub is_main: bool,
    pub sort_order: u32,
}

impl ImageRecord {
    /// Row for the image at `index`; index 0 is the main image.
    #[must_use]
    pub fn new(advertisement_id: Uuid, image_url: String, index: usize) -> Self {
        Self {
            advertisement_id,
            image_url,
            is_main: index == 0,
            sort_order: u32::try_from(index).unwrap_or(u32::MAX),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub advertisement_id: Uuid,
    pub feature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRecord {
    pub advertisement_id: Uuid,
    pub period: Period,
    pub price: f64,
    pub is_display: bool,
}

/// Wire value for the `ad_type` column.
#[must_use]
pub fn ad_type_wire(transaction: TransactionKind) -> &'static str {
    match transaction {
        TransactionKind::Sale => "sale",
        TransactionKind::Rent => "rent",
        TransactionKind::NotApplicable => "others",
    }
}

// =============================================================================
// SUBMISSION
// =============================================================================

/// Everything the persistence layer writes for one advertisement.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub advertisement: AdvertisementRecord,
    pub images: Vec<ImageData>,
    pub features: Vec<String>,
    pub pricing: Vec<(Period, f64)>,
}

/// The draft has no category or transaction kind yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("draft is incomplete: {0:?} is not set")]
pub struct IncompleteDraft(pub Field);

impl Submission {
    /// Project `draft` into rows for a new advertisement `id` owned by `office_id`.
    ///
    /// # Errors
    ///
    /// Returns [`IncompleteDraft`] when the category or transaction kind is missing.
    pub fn project(draft: &Draft, office_id: Uuid, id: Uuid) -> Result<Self, IncompleteDraft> {
        let category = draft.category.ok_or(IncompleteDraft(Field::CategoryType))?;
        let transaction = draft.transaction.ok_or(IncompleteDraft(Field::AdType))?;
        let set = FieldSet::for_draft(draft);

        let text = |field: TextField| -> Option<String> {
            let raw = draft.text(field).trim();
            (set.is_visible(Field::from(field)) && !raw.is_empty()).then(|| raw.to_string())
        };
        let amount = |field: TextField| text(field).and_then(|raw| parse_amount(&raw));
        let flag = |field: Field, value: bool| set.is_visible(field).then_some(value);

        let advertisement = AdvertisementRecord {
            id,
            office_id,
            category_type: category,
            ad_type: ad_type_wire(transaction).to_string(),
            category_id: draft.user_category.filter(|_| set.is_visible(Field::UserCategory)),
            title: draft.title.trim().to_string(),
            description: text(TextField::Description),
            price: amount(TextField::Price),
            negotiable: flag(Field::Negotiable, draft.negotiable),
            has_monthly_payment: flag(Field::HasMonthlyPayment, draft.has_monthly_payment),
            monthly_payment: amount(TextField::MonthlyPayment),
            manufacturer: text(TextField::Manufacturer),
            model: text(TextField::Model),
            kilometers: amount(TextField::Kilometers),
            condition: draft.condition.filter(|_| set.is_visible(Field::Condition)),
            import: text(TextField::Import),
            gear_type: text(TextField::GearType),
            color: text(TextField::Color),
            interior_color: text(TextField::InteriorColor),
            year: text(TextField::Year).and_then(|raw| parse_whole(&raw)),
            fuel_type: draft.fuel_type.filter(|_| set.is_visible(Field::FuelType)),
            body_type: text(TextField::BodyType),
            engine_size: text(TextField::EngineSize),
            km_limit: amount(TextField::KmLimit),
            deposit: amount(TextField::Deposit),
            property_type: text(TextField::PropertyType),
            area: amount(TextField::Area),
            display_period: draft.pricing.display_period().filter(|_| set.is_visible(Field::DisplayPeriod)),
            is_active: draft.is_active,
        };

        let features = if set.is_visible(Field::Features) { draft.features.clone() } else { Vec::new() };

        let pricing = if set.is_visible(Field::PricingOptions) {
            draft
                .pricing
                .options()
                .iter()
                .filter_map(|o| parse_amount(&o.price).filter(|p| *p > 0.0).map(|p| (o.period, p)))
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self { advertisement, images: draft.images.as_slice().to_vec(), features, pricing })
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.advertisement.id
    }

    #[must_use]
    pub fn feature_records(&self) -> Vec<FeatureRecord> {
        self.features
            .iter()
            .map(|feature| FeatureRecord { advertisement_id: self.id(), feature: feature.clone() })
            .collect()
    }

    #[must_use]
    pub fn pricing_records(&self) -> Vec<PricingRecord> {
        self.pricing
            .iter()
            .map(|(period, price)| PricingRecord {
                advertisement_id: self.id(),
                period: *period,
                price: *price,
                is_display: self.advertisement.display_period == Some(*period),
            })
            .collect()
    }
}
