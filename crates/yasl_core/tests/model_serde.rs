use yasl_core::{Item, List};

#[test]
fn list_serializes_with_plain_field_names() {
    let list = List {
        id: 7,
        name: "Kaufland".to_string(),
    };

    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(json, serde_json::json!({ "id": 7, "name": "Kaufland" }));
}

#[test]
fn item_roundtrips_through_json() {
    let item = Item {
        id: 3,
        list_id: 7,
        name: "Milch".to_string(),
        category: "Milchprodukte".to_string(),
        checked: true,
    };

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["list_id"], 7);
    assert_eq!(json["checked"], true);

    let decoded: Item = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}
