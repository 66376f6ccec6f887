//! JSON Settings Integration Tests
//!
//! Tests for flattening JSON / serde values into settings lists and
//! building trees from them.

mod common;

use cfgtree::{create_configuration, get_config_value, ConfigStore, Error, SettingsChanges};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct S3Collection {
    url: String,
    credentials: Credentials,
    max_connections: u64,
}

#[derive(Serialize)]
struct Credentials {
    access_key_id: String,
    secret_access_key: String,
}

#[test]
fn test_from_serialize_builds_nested_tree() {
    common::init_logging();
    let collection = S3Collection {
        url: "https://bucket.s3.amazonaws.com/data.csv".into(),
        credentials: Credentials {
            access_key_id: "AKIA".into(),
            secret_access_key: "secret".into(),
        },
        max_connections: 8,
    };

    let list = SettingsChanges::from_serialize(&collection).unwrap();
    assert_eq!(list.len(), 4);

    let config = create_configuration("s3", &list).unwrap();
    assert_eq!(config.keys("credentials"), vec!["access_key_id", "secret_access_key"]);
    assert_eq!(
        get_config_value::<String, _>(&config, "credentials.access_key_id").unwrap(),
        "AKIA"
    );
    assert_eq!(get_config_value::<u64, _>(&config, "max_connections").unwrap(), 8);
}

#[test]
fn test_custom_separator_names() {
    let list = SettingsChanges::from_json_with_separator(&json!({ "a": { "b": 1 } }), '/').unwrap();
    assert_eq!(list.iter().next().map(|c| c.name.as_str()), Some("a/b"));
}

#[test]
fn test_null_and_bool_become_text() {
    let list = SettingsChanges::from_json(&json!({ "enabled": true, "comment": null })).unwrap();
    let config = create_configuration("root", &list).unwrap();

    assert_eq!(config.get_string("enabled").unwrap(), "true");
    assert_eq!(config.get_string("comment").unwrap(), "NULL");
}

#[test]
fn test_arrays_rejected() {
    let err = SettingsChanges::from_json(&json!({ "hosts": ["a", "b"] })).unwrap_err();
    assert!(matches!(err, Error::Parse(ref msg) if msg.contains("hosts")));
}

#[test]
fn test_settings_list_serde_round_trip() {
    let list = SettingsChanges::from_json(&json!({ "x": 1, "y": "two" })).unwrap();
    let encoded = serde_json::to_string(&list).unwrap();
    let decoded: SettingsChanges = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, list);
}
