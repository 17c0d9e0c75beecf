use super::*;

fn kind(category: CategoryType, transaction: TransactionKind) -> FieldSet {
    FieldSet::for_kind(Some(category), Some(transaction))
}

// =============================================================
// for_kind
// =============================================================

#[test]
fn base_fields_always_required() {
    let set = FieldSet::for_kind(None, None);
    for field in [Field::CategoryType, Field::Title, Field::Images] {
        assert!(set.is_required(field));
    }
    assert!(!set.pricing_required);
}

#[test]
fn vehicle_sale_requires_condition_kilometers_price() {
    let set = kind(CategoryType::Vehicles, TransactionKind::Sale);
    for field in [Field::AdType, Field::Year, Field::FuelType, Field::Condition, Field::Kilometers, Field::Price] {
        assert!(set.is_required(field), "{field:?}");
    }
    assert!(!set.is_visible(Field::PricingOptions));
    assert!(!set.is_visible(Field::KmLimit));
    assert!(!set.pricing_required);
}

#[test]
fn vehicle_rent_requires_pricing_not_price() {
    let set = kind(CategoryType::Vehicles, TransactionKind::Rent);
    assert!(set.pricing_required);
    assert!(!set.is_visible(Field::Price));
    assert!(!set.is_visible(Field::Condition));
    assert!(!set.is_visible(Field::Manufacturer));
    assert!(set.is_visible(Field::KmLimit));
    assert!(set.is_visible(Field::Deposit));
    assert!(set.is_required(Field::Year));
}

#[test]
fn real_estate_sale_requires_price() {
    let set = kind(CategoryType::RealEstate, TransactionKind::Sale);
    assert!(set.is_required(Field::Price));
    assert!(set.is_required(Field::AdType));
    assert!(!set.is_required(Field::Year));
    assert_eq!(set.feature_mode, FeatureMode::AmenityChecklist);
}

#[test]
fn real_estate_rent_gates_deposit() {
    let set = kind(CategoryType::RealEstate, TransactionKind::Rent);
    assert!(set.pricing_required);
    assert!(set.is_visible(Field::HasDeposit));
    assert!(!set.is_visible(Field::KmLimit));
}

#[test]
fn others_requires_price_only() {
    let set = kind(CategoryType::Others, TransactionKind::NotApplicable);
    assert!(set.is_required(Field::Price));
    assert!(!set.is_visible(Field::AdType));
    assert!(!set.is_visible(Field::UserCategory));
    assert!(!set.pricing_required);
}

#[test]
fn required_fields_are_visible() {
    for category in CategoryType::ALL {
        for transaction in TransactionKind::ALL {
            let set = kind(*category, *transaction);
            assert!(set.required.is_subset(&set.visible), "{category} {transaction}");
        }
    }
}

// =============================================================
// for_draft
// =============================================================

#[test]
fn monthly_payment_follows_toggle() {
    let mut draft = Draft::for_category(CategoryType::Vehicles);
    draft.transaction = Some(TransactionKind::Sale);
    let set = FieldSet::for_draft(&draft);
    assert!(!set.is_visible(Field::MonthlyPayment));
    assert!(!set.is_required(Field::MonthlyPayment));

    draft.has_monthly_payment = true;
    let set = FieldSet::for_draft(&draft);
    assert!(set.is_required(Field::MonthlyPayment));
}

#[test]
fn monthly_payment_toggle_ignored_for_rent() {
    let mut draft = Draft::for_category(CategoryType::Vehicles);
    draft.transaction = Some(TransactionKind::Rent);
    draft.has_monthly_payment = true;
    let set = FieldSet::for_draft(&draft);
    assert!(!set.is_required(Field::MonthlyPayment));
}

#[test]
fn real_estate_deposit_follows_toggle() {
    let mut draft = Draft::for_category(CategoryType::RealEstate);
    draft.transaction = Some(TransactionKind::Rent);
    assert!(!FieldSet::for_draft(&draft).is_visible(Field::Deposit));
    draft.has_deposit = true;
    assert!(FieldSet::for_draft(&draft).is_visible(Field::Deposit));
}

#[test]
fn vehicle_deposit_is_ungated() {
    let mut draft = Draft::for_category(CategoryType::Vehicles);
    draft.transaction = Some(TransactionKind::Rent);
    assert!(FieldSet::for_draft(&draft).is_visible(Field::Deposit));
}

#[test]
fn amenity_features_follow_show_toggle() {
    let mut draft = Draft::for_category(CategoryType::RealEstate);
    draft.transaction = Some(TransactionKind::Sale);
    assert!(!FieldSet::for_draft(&draft).is_visible(Field::Features));
    draft.show_features = true;
    assert!(FieldSet::for_draft(&draft).is_visible(Field::Features));
}

#[test]
fn text_field_maps_to_field() {
    assert_eq!(Field::from(TextField::KmLimit), Field::KmLimit);
    assert_eq!(Field::from(TextField::Title), Field::Title);
}
