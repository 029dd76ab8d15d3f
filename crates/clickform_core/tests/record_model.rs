use clickform_core::Record;
use serde_json::json;

#[test]
fn record_serializes_with_flat_field_names() {
    let record = Record::new(3, "Ann", "ann@example.com");

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
        value,
        json!({ "id": 3, "name": "Ann", "email": "ann@example.com" })
    );

    let back: Record = serde_json::from_value(value).unwrap();
    assert_eq!(back, record);
}
