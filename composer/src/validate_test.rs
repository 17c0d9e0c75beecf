use super::*;
use crate::images::ImageData;
use crate::types::{CategoryType, Condition, FuelType, Period, TransactionKind};

const YEAR: i32 = 2025;

fn image() -> ImageData {
    ImageData::new("image/png", vec![0x89, b'P', b'N', b'G'])
}

fn draft(category: CategoryType, transaction: TransactionKind) -> Draft {
    let mut draft = Draft::for_category(category);
    if category.has_transaction_kind() {
        draft.transaction = Some(transaction);
    }
    draft
}

fn vehicle_sale() -> Draft {
    let mut d = draft(CategoryType::Vehicles, TransactionKind::Sale);
    d.set_text(TextField::Title, "Toyota 2020");
    d.set_text(TextField::Year, "2020");
    d.fuel_type = Some(FuelType::Petrol);
    d.condition = Some(Condition::Excellent);
    d.set_text(TextField::Kilometers, "50000");
    d.set_text(TextField::Price, "8000");
    d.images.add([image()]);
    d
}

fn vehicle_rent_without_pricing() -> Draft {
    let mut d = draft(CategoryType::Vehicles, TransactionKind::Rent);
    d.set_text(TextField::Title, "Daily rental");
    d.set_text(TextField::Year, "2022");
    d.fuel_type = Some(FuelType::Diesel);
    d.images.add([image()]);
    d
}

fn errors(report: &ValidationReport) -> Vec<Field> {
    report.errors.iter().copied().collect()
}

// =============================================================
// Complete drafts
// =============================================================

#[test]
fn complete_vehicle_sale_is_valid() {
    let report = validate_draft(&vehicle_sale(), YEAR);
    assert!(report.is_valid(), "{:?}", report.errors);
}

#[test]
fn complete_others_is_valid() {
    let mut d = draft(CategoryType::Others, TransactionKind::NotApplicable);
    d.set_text(TextField::Title, "Desk");
    d.set_text(TextField::Price, "40");
    d.images.add([image()]);
    assert!(validate_draft(&d, YEAR).is_valid());
}

#[test]
fn complete_real_estate_rent_is_valid() {
    let mut d = draft(CategoryType::RealEstate, TransactionKind::Rent);
    d.set_text(TextField::Title, "Flat");
    d.images.add([image()]);
    d.pricing.set_staging_period(Some(Period::Monthly));
    d.pricing.set_staging_price("400".into());
    d.pricing.add().unwrap();
    assert!(validate_draft(&d, YEAR).is_valid());
}

// =============================================================
// Required fields
// =============================================================

#[test]
fn empty_draft_reports_everything_at_once() {
    let report = validate_draft(&Draft::default(), YEAR);
    assert_eq!(errors(&report), vec![Field::CategoryType, Field::Title, Field::Images]);
}

#[test]
fn vehicle_sale_reports_all_missing_fields() {
    let d = draft(CategoryType::Vehicles, TransactionKind::Sale);
    let report = validate_draft(&d, YEAR);
    for field in [
        Field::Title,
        Field::Price,
        Field::Kilometers,
        Field::Year,
        Field::Condition,
        Field::FuelType,
        Field::Images,
    ] {
        assert!(report.has_error(field), "{field:?}");
    }
    assert!(!report.has_error(Field::PricingOptions));
}

#[test]
fn missing_ad_type_is_reported() {
    let mut d = vehicle_sale();
    d.transaction = None;
    assert!(validate_draft(&d, YEAR).has_error(Field::AdType));
}

#[test]
fn monthly_payment_required_only_when_toggled() {
    let mut d = vehicle_sale();
    assert!(validate_draft(&d, YEAR).is_valid());
    d.has_monthly_payment = true;
    assert!(validate_draft(&d, YEAR).has_error(Field::MonthlyPayment));
    d.set_text(TextField::MonthlyPayment, "250");
    assert!(validate_draft(&d, YEAR).is_valid());
}

#[test]
fn vehicle_rent_without_pricing_always_fails() {
    let d = vehicle_rent_without_pricing();
    let report = validate_draft(&d, YEAR);
    assert_eq!(errors(&report), vec![Field::PricingOptions]);
}

#[test]
fn vehicle_rent_pricing_error_regardless_of_other_fields() {
    let mut d = vehicle_rent_without_pricing();
    d.set_text(TextField::Deposit, "100");
    d.set_text(TextField::KmLimit, "300");
    d.set_text(TextField::Description, "Clean");
    d.set_text(TextField::BodyType, "SUV");
    assert!(validate_draft(&d, YEAR).has_error(Field::PricingOptions));
    d.set_text(TextField::Title, "");
    assert!(validate_draft(&d, YEAR).has_error(Field::PricingOptions));
}

#[test]
fn vehicle_rent_with_pricing_is_valid() {
    let mut d = vehicle_rent_without_pricing();
    d.pricing.set_staging_price("35".into());
    d.pricing.add().unwrap();
    assert!(validate_draft(&d, YEAR).is_valid());
}

#[test]
fn hidden_fields_are_not_validated() {
    let mut d = vehicle_rent_without_pricing();
    d.pricing.set_staging_price("35".into());
    d.pricing.add().unwrap();
    d.set_text(TextField::Price, "not a number");
    d.set_text(TextField::Kilometers, "-1");
    assert!(validate_draft(&d, YEAR).is_valid());
}

// =============================================================
// Images
// =============================================================

#[test]
fn zero_images_fails() {
    let mut d = vehicle_sale();
    d.images.remove(0);
    assert!(validate_draft(&d, YEAR).has_error(Field::Images));
}

#[test]
fn image_count_bounds() {
    let mut d = vehicle_sale();
    d.images.add((0..20).map(|_| image()));
    assert_eq!(d.images.len(), 10);
    assert!(!validate_draft(&d, YEAR).has_error(Field::Images));
}

// =============================================================
// Formats
// =============================================================

#[test]
fn year_range() {
    let mut d = vehicle_sale();
    for (year, ok) in [("1899", false), ("1900", true), ("2026", true), ("2027", false), ("20x0", false), ("٢٠٢٠", true)] {
        d.set_text(TextField::Year, year);
        assert_eq!(!validate_draft(&d, YEAR).has_error(Field::Year), ok, "{year}");
    }
}

#[test]
fn price_must_be_positive() {
    let mut d = vehicle_sale();
    for (price, ok) in [("0", false), ("-3", false), ("abc", false), ("1,500", true), ("0.5", true)] {
        d.set_text(TextField::Price, price);
        assert_eq!(!validate_draft(&d, YEAR).has_error(Field::Price), ok, "{price}");
    }
}

#[test]
fn kilometers_may_be_zero() {
    let mut d = vehicle_sale();
    d.set_text(TextField::Kilometers, "0");
    assert!(validate_draft(&d, YEAR).is_valid());
    d.set_text(TextField::Kilometers, "-10");
    assert!(validate_draft(&d, YEAR).has_error(Field::Kilometers));
}

#[test]
fn optional_numeric_fields_checked_when_present() {
    let mut d = draft(CategoryType::RealEstate, TransactionKind::Sale);
    d.set_text(TextField::Title, "House");
    d.set_text(TextField::Price, "90000");
    d.images.add([image()]);
    d.set_text(TextField::Area, "large");
    assert_eq!(errors(&validate_draft(&d, YEAR)), vec![Field::Area]);
    d.set_text(TextField::Area, "");
    assert!(validate_draft(&d, YEAR).is_valid());
}

#[test]
fn validation_is_pure() {
    let d = vehicle_rent_without_pricing();
    let before = d.clone();
    let first = validate_draft(&d, YEAR);
    let second = validate_draft(&d, YEAR);
    assert_eq!(first, second);
    assert_eq!(d, before);
}
