//! Rental pricing options and the staging editor that adds them.
//!
//! DESIGN
//! ======
//! The editor keeps a staging `{period, price}` input apart from the
//! committed options. Committed options are unique by period: adding a price
//! for a period that already exists overwrites it. `display_period` always
//! names a committed period while any exist, and is unset otherwise.

#[cfg(test)]
#[path = "pricing_test.rs"]
mod pricing_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::numerals::parse_amount;
use crate::types::Period;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("price must be a positive number")]
    InvalidPrice,
    #[error("choose a pricing period")]
    MissingPeriod,
    #[error("every pricing period already has a price")]
    AllPeriodsUsed,
}

/// A committed `(period, price)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingOption {
    pub id: Uuid,
    pub period: Period,
    pub price: String,
}

impl PricingOption {
    /// Whether the price parses as a positive amount.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_positive_amount(&self.price)
    }
}

/// What a successful add did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingChange {
    Added(Uuid),
    Updated(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingEditor {
    options: Vec<PricingOption>,
    display_period: Option<Period>,
    staging_period: Option<Period>,
    staging_price: String,
}

impl Default for PricingEditor {
    fn default() -> Self {
        Self { options: Vec::new(), display_period: None, staging_period: Some(Period::Daily), staging_price: String::new() }
    }
}

impl PricingEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Queries ---

    #[must_use]
    pub fn options(&self) -> &[PricingOption] {
        &self.options
    }

    #[must_use]
    pub fn display_period(&self) -> Option<Period> {
        self.display_period
    }

    /// The committed option shown as the headline price.
    #[must_use]
    pub fn display_option(&self) -> Option<&PricingOption> {
        let period = self.display_period?;
        self.find(period)
    }

    #[must_use]
    pub fn staging_period(&self) -> Option<Period> {
        self.staging_period
    }

    #[must_use]
    pub fn staging_price(&self) -> &str {
        &self.staging_price
    }

    #[must_use]
    pub fn find(&self, period: Period) -> Option<&PricingOption> {
        self.options.iter().find(|o| o.period == period)
    }

    #[must_use]
    pub fn has_period(&self, period: Period) -> bool {
        self.find(period).is_some()
    }

    /// Periods with no committed option, in cycle order.
    #[must_use]
    pub fn unused_periods(&self) -> Vec<Period> {
        Period::ALL.iter().copied().filter(|p| !self.has_period(*p)).collect()
    }

    /// The add control is hidden once every period has a price.
    #[must_use]
    pub fn all_periods_used(&self) -> bool {
        Period::ALL.iter().all(|p| self.has_period(*p))
    }

    /// At least one committed option has a usable price.
    #[must_use]
    pub fn has_valid_option(&self) -> bool {
        self.options.iter().any(PricingOption::is_valid)
    }

    // --- Staging ---

    pub fn set_staging_period(&mut self, period: Option<Period>) {
        self.staging_period = period;
    }

    pub fn set_staging_price(&mut self, price: String) {
        self.staging_price = price;
    }

    // --- Commit ---

    /// Commit the staging input.
    ///
    /// # Errors
    ///
    /// `InvalidPrice` for an empty or non-positive price, then `AllPeriodsUsed`
    /// or `MissingPeriod` when no period is staged.
    pub fn add(&mut self) -> Result<PricingChange, PricingError> {
        if !is_positive_amount(&self.staging_price) {
            return Err(PricingError::InvalidPrice);
        }
        let Some(period) = self.staging_period else {
            if self.all_periods_used() {
                return Err(PricingError::AllPeriodsUsed);
            }
            return Err(PricingError::MissingPeriod);
        };
        let price = self.staging_price.trim().to_string();

        let change = if let Some(existing) = self.options.iter_mut().find(|o| o.period == period) {
            existing.price = price;
            PricingChange::Updated(existing.id)
        } else {
            let id = Uuid::new_v4();
            self.options.push(PricingOption { id, period, price });
            PricingChange::Added(id)
        };

        if self.display_period.is_none() {
            self.display_period = Some(period);
        }
        self.staging_price.clear();
        self.staging_period = self.next_unused_after(period);
        Ok(change)
    }

    /// Remove a committed option by id.
    pub fn remove(&mut self, id: Uuid) -> Option<PricingOption> {
        let index = self.options.iter().position(|o| o.id == id)?;
        let removed = self.options.remove(index);
        if self.display_period == Some(removed.period) {
            self.display_period = self.options.first().map(|o| o.period);
        }
        if self.staging_period.is_none() {
            self.staging_period = self.unused_periods().first().copied();
        }
        Some(removed)
    }

    /// Choose the headline period. Only committed periods are accepted.
    pub fn set_display_period(&mut self, period: Period) -> bool {
        if !self.has_period(period) {
            return false;
        }
        self.display_period = Some(period);
        true
    }

    fn next_unused_after(&self, period: Period) -> Option<Period> {
        let start = period.cycle_index();
        (1..=Period::ALL.len())
            .map(|step| Period::ALL[(start + step) % Period::ALL.len()])
            .find(|p| !self.has_period(*p))
    }
}

fn is_positive_amount(raw: &str) -> bool {
    parse_amount(raw).is_some_and(|v| v > 0.0)
}
