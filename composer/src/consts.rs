//! Limits and fixed labels shared across the composer.

// ── Draft limits ────────────────────────────────────────────────

/// Maximum number of images attached to one advertisement.
pub const MAX_IMAGES: usize = 10;

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Earliest accepted vehicle model year.
pub const MIN_VEHICLE_YEAR: i32 = 1900;

// ── Real estate ─────────────────────────────────────────────────

/// Predefined amenity checklist offered for real-estate listings.
pub const AMENITIES: &[&str] = &[
    "Parking",
    "Elevator",
    "Balcony",
    "Garden",
    "Swimming pool",
    "Central heating",
    "Air conditioning",
    "Furnished",
    "Security",
    "Storage room",
    "Sea view",
    "Maid's room",
];
