//! Enumerations shared by the draft, the rules table, and the wire records.
//!
//! Wire strings match the values the dashboard has always stored
//! (`real-estate`, `excellent`, `monthly`, ...). Parsing is lenient about
//! case, surrounding whitespace, and `_`/space versus `-`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A string did not name any variant of the expected enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

fn normalize_token(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace(['_', ' '], "-")
}

/// Declares a fieldless enum with kebab-case wire names, `as_str`, `Display`, and `FromStr`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire string for this variant.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let token = normalize_token(s);
                $( if token == $wire { return Ok(Self::$variant); } )+
                Err(ParseEnumError { kind: $kind, value: s.to_string() })
            }
        }
    };
}

wire_enum! {
    /// Top-level listing category, chosen once per draft.
    CategoryType, "category type" {
        Vehicles => "vehicles",
        RealEstate => "real-estate",
        Others => "others",
    }
}

impl CategoryType {
    /// Whether this category asks for a sale/rent choice.
    #[must_use]
    pub fn has_transaction_kind(self) -> bool {
        matches!(self, Self::Vehicles | Self::RealEstate)
    }
}

wire_enum! {
    /// Whether the listing is for sale or for rent.
    ///
    /// `NotApplicable` is the only value for the `others` category.
    TransactionKind, "transaction kind" {
        Sale => "sale",
        Rent => "rent",
        NotApplicable => "not-applicable",
    }
}

wire_enum! {
    /// Rental billing period, in add-cycle order.
    Period, "period" {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
        Yearly => "yearly",
    }
}

impl Period {
    /// Position in the add cycle (daily = 0 .. yearly = 3).
    #[must_use]
    pub fn cycle_index(self) -> usize {
        match self {
            Self::Daily => 0,
            Self::Weekly => 1,
            Self::Monthly => 2,
            Self::Yearly => 3,
        }
    }
}

wire_enum! {
    /// Condition of a vehicle offered for sale.
    Condition, "condition" {
        New => "new",
        Excellent => "excellent",
        VeryGood => "very-good",
        Good => "good",
        Fair => "fair",
        NeedsRepair => "needs-repair",
    }
}

wire_enum! {
    /// Vehicle fuel type.
    FuelType, "fuel type" {
        Petrol => "petrol",
        Diesel => "diesel",
        Hybrid => "hybrid",
        Electric => "electric",
        Gas => "gas",
    }
}
