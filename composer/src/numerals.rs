//! Digit normalization for text inputs.
//!
//! Users type on Arabic and Persian keyboards, so every text field write
//! passes through [`normalize_digits`] before it reaches the draft. Numeric
//! parsing downstream then only has to understand ASCII.

#[cfg(test)]
#[path = "numerals_test.rs"]
mod numerals_test;

/// Arabic-Indic digits, U+0660..=U+0669.
const ARABIC_INDIC_ZERO: u32 = 0x0660;
/// Extended Arabic-Indic (Persian/Urdu) digits, U+06F0..=U+06F9.
const EXTENDED_ARABIC_INDIC_ZERO: u32 = 0x06F0;

/// Transliterate Eastern Arabic digits to ASCII `0-9`. Other characters pass through.
#[must_use]
pub fn normalize_digits(input: &str) -> String {
    input.chars().map(ascii_digit).collect()
}

fn ascii_digit(c: char) -> char {
    let code = u32::from(c);
    for zero in [ARABIC_INDIC_ZERO, EXTENDED_ARABIC_INDIC_ZERO] {
        if (zero..zero + 10).contains(&code) {
            return char::from_digit(code - zero, 10).unwrap_or(c);
        }
    }
    match c {
        // Arabic decimal and thousands separators.
        '\u{066B}' => '.',
        '\u{066C}' => ',',
        _ => c,
    }
}

/// Parse a user-entered amount. Accepts thousands separators and surrounding
/// whitespace; rejects empty, non-finite, or malformed input.
#[must_use]
pub fn parse_amount(input: &str) -> Option<f64> {
    let cleaned: String = normalize_digits(input).chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Parse a whole-number input such as a model year.
#[must_use]
pub fn parse_whole(input: &str) -> Option<i64> {
    let cleaned: String = normalize_digits(input).chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    match cleaned.parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) => None,
    }
}
