//! The draft advertisement owned by one composer session.
//!
//! Text inputs are kept as the user typed them (after digit normalization)
//! so the form can echo them back verbatim. Parsing into numbers happens
//! only in validation and record projection.

#[cfg(test)]
#[path = "draft_test.rs"]
mod draft_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::TITLE_MAX_CHARS;
use crate::images::ImageList;
use crate::numerals::normalize_digits;
use crate::pricing::PricingEditor;
use crate::types::{CategoryType, Condition, FuelType, TransactionKind};

/// Free-text inputs on the main form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    Title,
    Description,
    Price,
    MonthlyPayment,
    Manufacturer,
    Model,
    Kilometers,
    Import,
    GearType,
    Color,
    InteriorColor,
    Year,
    BodyType,
    EngineSize,
    Deposit,
    KmLimit,
    PropertyType,
    Area,
}

impl TextField {
    pub const ALL: &'static [TextField] = &[
        Self::Title,
        Self::Description,
        Self::Price,
        Self::MonthlyPayment,
        Self::Manufacturer,
        Self::Model,
        Self::Kilometers,
        Self::Import,
        Self::GearType,
        Self::Color,
        Self::InteriorColor,
        Self::Year,
        Self::BodyType,
        Self::EngineSize,
        Self::Deposit,
        Self::KmLimit,
        Self::PropertyType,
        Self::Area,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub category: Option<CategoryType>,
    pub transaction: Option<TransactionKind>,
    pub user_category: Option<Uuid>,

    pub title: String,
    pub description: String,
    pub price: String,
    pub negotiable: bool,
    pub has_monthly_payment: bool,
    pub monthly_payment: String,

    // Vehicles
    pub manufacturer: String,
    pub model: String,
    pub kilometers: String,
    pub condition: Option<Condition>,
    pub import: String,
    pub gear_type: String,
    pub color: String,
    pub interior_color: String,
    pub year: String,
    pub fuel_type: Option<FuelType>,
    pub body_type: String,
    pub engine_size: String,
    pub km_limit: String,

    // Rentals
    pub has_deposit: bool,
    pub deposit: String,
    pub pricing: PricingEditor,

    // Real estate
    pub property_type: String,
    pub area: String,
    pub show_features: bool,

    pub features: Vec<String>,
    pub images: ImageList,
    pub is_active: bool,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            category: None,
            transaction: None,
            user_category: None,
            title: String::new(),
            description: String::new(),
            price: String::new(),
            negotiable: false,
            has_monthly_payment: false,
            monthly_payment: String::new(),
            manufacturer: String::new(),
            model: String::new(),
            kilometers: String::new(),
            condition: None,
            import: String::new(),
            gear_type: String::new(),
            color: String::new(),
            interior_color: String::new(),
            year: String::new(),
            fuel_type: None,
            body_type: String::new(),
            engine_size: String::new(),
            km_limit: String::new(),
            has_deposit: false,
            deposit: String::new(),
            pricing: PricingEditor::new(),
            property_type: String::new(),
            area: String::new(),
            show_features: false,
            features: Vec::new(),
            images: ImageList::new(),
            is_active: true,
        }
    }
}

impl Draft {
    /// A fresh draft with the category fixed. `others` has no sale/rent
    /// choice and is pinned to `NotApplicable`.
    #[must_use]
    pub fn for_category(category: CategoryType) -> Self {
        let transaction = (!category.has_transaction_kind()).then_some(TransactionKind::NotApplicable);
        Self { category: Some(category), transaction, ..Self::default() }
    }

    #[must_use]
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Title => &self.title,
            TextField::Description => &self.description,
            TextField::Price => &self.price,
            TextField::MonthlyPayment => &self.monthly_payment,
            TextField::Manufacturer => &self.manufacturer,
            TextField::Model => &self.model,
            TextField::Kilometers => &self.kilometers,
            TextField::Import => &self.import,
            TextField::GearType => &self.gear_type,
            TextField::Color => &self.color,
            TextField::InteriorColor => &self.interior_color,
            TextField::Year => &self.year,
            TextField::BodyType => &self.body_type,
            TextField::EngineSize => &self.engine_size,
            TextField::Deposit => &self.deposit,
            TextField::KmLimit => &self.km_limit,
            TextField::PropertyType => &self.property_type,
            TextField::Area => &self.area,
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Title => &mut self.title,
            TextField::Description => &mut self.description,
            TextField::Price => &mut self.price,
            TextField::MonthlyPayment => &mut self.monthly_payment,
            TextField::Manufacturer => &mut self.manufacturer,
            TextField::Model => &mut self.model,
            TextField::Kilometers => &mut self.kilometers,
            TextField::Import => &mut self.import,
            TextField::GearType => &mut self.gear_type,
            TextField::Color => &mut self.color,
            TextField::InteriorColor => &mut self.interior_color,
            TextField::Year => &mut self.year,
            TextField::BodyType => &mut self.body_type,
            TextField::EngineSize => &mut self.engine_size,
            TextField::Deposit => &mut self.deposit,
            TextField::KmLimit => &mut self.km_limit,
            TextField::PropertyType => &mut self.property_type,
            TextField::Area => &mut self.area,
        }
    }

    /// Store a text input. Eastern Arabic digits become ASCII and the title
    /// is cut at its character limit.
    pub fn set_text(&mut self, field: TextField, value: &str) {
        let mut normalized = normalize_digits(value);
        if field == TextField::Title {
            normalized = normalized.chars().take(TITLE_MAX_CHARS).collect();
        }
        *self.text_mut(field) = normalized;
    }

    /// Whether backing out of the form would throw away user input.
    #[must_use]
    pub fn has_user_content(&self) -> bool {
        let filled = |s: &str| !s.trim().is_empty();
        filled(&self.title)
            || filled(&self.description)
            || filled(&self.price)
            || !self.images.is_empty()
            || !self.features.is_empty()
    }

    // --- Features ---

    /// Append a free-form feature. Blank and duplicate labels are ignored.
    pub fn add_feature(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() || self.has_feature(label) {
            return false;
        }
        self.features.push(label.to_string());
        true
    }

    pub fn remove_feature(&mut self, index: usize) -> Option<String> {
        (index < self.features.len()).then(|| self.features.remove(index))
    }

    /// Checkbox semantics: checks the label if absent, unchecks it if present.
    pub fn toggle_feature(&mut self, label: &str) {
        let label = label.trim();
        if let Some(index) = self.features.iter().position(|f| f == label) {
            self.features.remove(index);
        } else if !label.is_empty() {
            self.features.push(label.to_string());
        }
    }

    /// Check or uncheck a label; repeating a call changes nothing.
    pub fn set_feature(&mut self, label: &str, on: bool) {
        if on {
            self.add_feature(label);
        } else if let Some(index) = self.features.iter().position(|f| f == label.trim()) {
            self.features.remove(index);
        }
    }

    #[must_use]
    pub fn has_feature(&self, label: &str) -> bool {
        self.features.iter().any(|f| f == label)
    }
}
