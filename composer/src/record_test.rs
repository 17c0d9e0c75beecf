#![allow(clippy::float_cmp)]

use super::*;

fn image(tag: u8) -> ImageData {
    ImageData::new("image/jpeg", vec![0xFF, 0xD8, tag])
}

fn ids() -> (Uuid, Uuid) {
    (Uuid::new_v4(), Uuid::new_v4())
}

fn vehicle(transaction: TransactionKind) -> Draft {
    let mut d = Draft::for_category(CategoryType::Vehicles);
    d.transaction = Some(transaction);
    d.set_text(TextField::Title, "  Toyota 2020 ");
    d.set_text(TextField::Year, "2020");
    d.fuel_type = Some(FuelType::Petrol);
    d.images.add([image(1), image(2)]);
    d
}

#[test]
fn sale_record_carries_sale_fields() {
    let mut d = vehicle(TransactionKind::Sale);
    d.condition = Some(Condition::Excellent);
    d.set_text(TextField::Kilometers, "50,000");
    d.set_text(TextField::Price, "8000");
    d.negotiable = true;
    let (office, id) = ids();
    let sub = Submission::project(&d, office, id).unwrap();
    let ad = &sub.advertisement;
    assert_eq!(ad.id, id);
    assert_eq!(ad.office_id, office);
    assert_eq!(ad.ad_type, "sale");
    assert_eq!(ad.title, "Toyota 2020");
    assert_eq!(ad.price, Some(8000.0));
    assert_eq!(ad.kilometers, Some(50_000.0));
    assert_eq!(ad.year, Some(2020));
    assert_eq!(ad.negotiable, Some(true));
    assert_eq!(ad.condition, Some(Condition::Excellent));
    assert_eq!(ad.has_monthly_payment, Some(false));
    assert_eq!(ad.monthly_payment, None);
    assert!(sub.pricing.is_empty());
}

#[test]
fn sale_never_sends_rent_fields() {
    let mut d = vehicle(TransactionKind::Sale);
    d.set_text(TextField::Deposit, "200");
    d.set_text(TextField::KmLimit, "300");
    d.pricing.set_staging_price("50".into());
    d.pricing.add().unwrap();
    let (office, id) = ids();
    let sub = Submission::project(&d, office, id).unwrap();
    assert_eq!(sub.advertisement.deposit, None);
    assert_eq!(sub.advertisement.km_limit, None);
    assert_eq!(sub.advertisement.display_period, None);
    assert!(sub.pricing_records().is_empty());
}

#[test]
fn rent_never_sends_sale_fields() {
    let mut d = vehicle(TransactionKind::Rent);
    d.set_text(TextField::Price, "9000");
    d.condition = Some(Condition::Good);
    d.negotiable = true;
    d.set_text(TextField::KmLimit, "250");
    let (office, id) = ids();
    let sub = Submission::project(&d, office, id).unwrap();
    let ad = &sub.advertisement;
    assert_eq!(ad.ad_type, "rent");
    assert_eq!(ad.price, None);
    assert_eq!(ad.condition, None);
    assert_eq!(ad.negotiable, None);
    assert_eq!(ad.km_limit, Some(250.0));
}

#[test]
fn pricing_records_mark_display_period() {
    let mut d = vehicle(TransactionKind::Rent);
    for (period, price) in [(Period::Daily, "30"), (Period::Weekly, "180")] {
        d.pricing.set_staging_period(Some(period));
        d.pricing.set_staging_price(price.into());
        d.pricing.add().unwrap();
    }
    d.pricing.set_display_period(Period::Weekly);
    let (office, id) = ids();
    let sub = Submission::project(&d, office, id).unwrap();
    let rows = sub.pricing_records();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.advertisement_id == id));
    assert_eq!(rows[0].period, Period::Daily);
    assert_eq!(rows[0].price, 30.0);
    assert!(!rows[0].is_display);
    assert!(rows[1].is_display);
    assert_eq!(sub.advertisement.display_period, Some(Period::Weekly));
}

#[test]
fn others_maps_to_others_ad_type() {
    let mut d = Draft::for_category(CategoryType::Others);
    d.set_text(TextField::Title, "Desk");
    d.set_text(TextField::Price, "40");
    d.set_text(TextField::Year, "2001");
    let (office, id) = ids();
    let sub = Submission::project(&d, office, id).unwrap();
    assert_eq!(sub.advertisement.ad_type, "others");
    assert_eq!(sub.advertisement.year, None);
    assert_eq!(sub.advertisement.category_id, None);
}

#[test]
fn hidden_amenities_are_not_sent() {
    let mut d = Draft::for_category(CategoryType::RealEstate);
    d.transaction = Some(TransactionKind::Sale);
    d.toggle_feature("Parking");
    let (office, id) = ids();
    let sub = Submission::project(&d, office, id).unwrap();
    assert!(sub.feature_records().is_empty());

    d.show_features = true;
    let sub = Submission::project(&d, office, id).unwrap();
    let rows = sub.feature_records();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].feature, "Parking");
}

#[test]
fn real_estate_deposit_follows_toggle() {
    let mut d = Draft::for_category(CategoryType::RealEstate);
    d.transaction = Some(TransactionKind::Rent);
    d.set_text(TextField::Deposit, "500");
    let (office, id) = ids();
    assert_eq!(Submission::project(&d, office, id).unwrap().advertisement.deposit, None);
    d.has_deposit = true;
    assert_eq!(Submission::project(&d, office, id).unwrap().advertisement.deposit, Some(500.0));
}

#[test]
fn images_keep_order() {
    let d = vehicle(TransactionKind::Sale);
    let (office, id) = ids();
    let sub = Submission::project(&d, office, id).unwrap();
    assert_eq!(sub.images, vec![image(1), image(2)]);
}

#[test]
fn image_record_marks_index_zero_main() {
    let id = Uuid::new_v4();
    let main = ImageRecord::new(id, "a".into(), 0);
    let other = ImageRecord::new(id, "b".into(), 3);
    assert!(main.is_main);
    assert!(!other.is_main);
    assert_eq!(other.sort_order, 3);
}

#[test]
fn incomplete_draft_is_rejected() {
    let (office, id) = ids();
    assert_eq!(Submission::project(&Draft::default(), office, id), Err(IncompleteDraft(Field::CategoryType)));
    let d = Draft::for_category(CategoryType::Vehicles);
    assert_eq!(Submission::project(&d, office, id), Err(IncompleteDraft(Field::AdType)));
}

#[test]
fn hidden_fields_serialize_as_null() {
    let d = vehicle(TransactionKind::Rent);
    let (office, id) = ids();
    let sub = Submission::project(&d, office, id).unwrap();
    let json = serde_json::to_value(&sub.advertisement).unwrap();
    assert!(json["price"].is_null());
    assert!(json["condition"].is_null());
    assert_eq!(json["category_type"], "vehicles");
    assert_eq!(json["fuel_type"], "petrol");
    assert_eq!(json["is_active"], true);
}
