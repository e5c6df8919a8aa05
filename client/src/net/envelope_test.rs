use super::*;
use serde_json::json;

#[test]
fn list_items_accepts_every_envelope() {
    for payload in [
        json!([{"id": 1}]),
        json!({"data": [{"id": 1}]}),
        json!({"results": [{"id": 1}]}),
        json!({"appointments": [{"id": 1}]}),
    ] {
        assert_eq!(list_items(payload), vec![json!({"id": 1})]);
    }
}

#[test]
fn list_items_unknown_shape_is_empty() {
    assert!(list_items(json!({"count": 3})).is_empty());
    assert!(list_items(json!("nope")).is_empty());
    assert!(list_items(json!({"data": "not a list"})).is_empty());
}

#[test]
fn parse_object_unwraps_data() {
    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct Thing {
        id: i64,
    }
    assert_eq!(parse_object::<Thing>(json!({"data": {"id": 4}})).unwrap(), Thing { id: 4 });
    assert_eq!(parse_object::<Thing>(json!({"id": 5})).unwrap(), Thing { id: 5 });
}
