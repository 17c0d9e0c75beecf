use super::*;

// =============================================================
// normalize_digits
// =============================================================

#[test]
fn arabic_indic_digits_become_ascii() {
    assert_eq!(normalize_digits("٠١٢٣٤٥٦٧٨٩"), "0123456789");
}

#[test]
fn persian_digits_become_ascii() {
    assert_eq!(normalize_digits("۲۰۲۰"), "2020");
}

#[test]
fn mixed_text_keeps_letters() {
    assert_eq!(normalize_digits("تويوتا ٢٠٢٠ Camry"), "تويوتا 2020 Camry");
}

#[test]
fn arabic_separators_are_mapped() {
    assert_eq!(normalize_digits("١٢٬٥٠٠٫٧٥"), "12,500.75");
}

#[test]
fn ascii_input_is_unchanged() {
    assert_eq!(normalize_digits("Price 8000"), "Price 8000");
}

// =============================================================
// parse_amount / parse_whole
// =============================================================

#[test]
fn parse_amount_plain_and_separated() {
    assert_eq!(parse_amount("8000"), Some(8000.0));
    assert_eq!(parse_amount(" 12,500.5 "), Some(12500.5));
    assert_eq!(parse_amount("٨٠٠٠"), Some(8000.0));
}

#[test]
fn parse_amount_rejects_garbage() {
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("   "), None);
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount("inf"), None);
    assert_eq!(parse_amount("NaN"), None);
}

#[test]
fn parse_whole_accepts_integers_only() {
    assert_eq!(parse_whole("2020"), Some(2020));
    assert_eq!(parse_whole("۱۹۹۹"), Some(1999));
    assert_eq!(parse_whole("2020.5"), None);
    assert_eq!(parse_whole(""), None);
}
