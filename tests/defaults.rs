mod common;
use common::{create_store, object};
use optcache::Error;
use serde_json::{json, Value};

#[test]
fn test_set_and_get_default() {
    let mut store = create_store();
    store.set_default("a", "b").unwrap();
    assert!(store.defaults().contains_key("a"));
    assert_eq!(store.default_for("a"), Some(&json!("b")));
    assert!(store.values().is_empty());
}

#[test]
fn test_chained_default_merges() {
    let mut store = create_store();
    store
        .merge_defaults(json!({"x": "xxx", "y": "yyy"}))
        .unwrap()
        .merge_defaults(json!({"a": "aaa"}))
        .unwrap();
    assert_eq!(store.default_for("x"), Some(&json!("xxx")));
    assert_eq!(store.default_for("a"), Some(&json!("aaa")));
}

#[test]
fn test_invalid_default_update_rejected() {
    let mut store = create_store();
    let err = store.merge_defaults(Value::Null).unwrap_err();
    assert_eq!(err, Error::InvalidDefault);
    assert_eq!(err.to_string(), "expected default to be a string or object");
    assert_eq!(store.merge_defaults(json!([])).unwrap_err(), Error::InvalidDefault);
}

#[test]
fn test_nested_defaults() {
    let mut store = create_store();
    store.set_default("a.b.c", json!({"d": "e"})).unwrap();
    assert_eq!(store.defaults().get("a"), Some(&json!({"b": {"c": {"d": "e"}}})));
    assert_eq!(store.default_for("a.b"), Some(&json!({"c": {"d": "e"}})));

    store.set_default(["x", "y"], json!({"z": "w"})).unwrap();
    assert_eq!(store.default_for(["x", "y", "z"]), Some(&json!("w")));
}

#[test]
fn test_default_list_of_mappings() {
    let mut store = create_store();
    store
        .merge_defaults(vec![object(json!({"g": "h"})), object(json!({"i": "j"}))])
        .unwrap();
    assert_eq!(store.default_for("g"), Some(&json!("h")));
    assert_eq!(store.default_for("i"), Some(&json!("j")));
}

#[test]
fn test_option_falls_back_to_default() {
    let mut store = create_store();
    store.merge_options(json!({"a": "aaa", "b": "bbb"})).unwrap();
    store
        .merge_defaults(json!({"a": "AAA", "x": "xxx"}))
        .unwrap();
    assert_eq!(store.option("a"), Some(&json!("aaa")));
    assert_eq!(store.option("x"), Some(&json!("xxx")));
}

#[test]
fn test_nested_default_fallback() {
    let mut store = create_store();
    store.set_option("a.b.c", json!({"d": "e"})).unwrap();
    store.set_default("z.y.x", json!({"w": "v"})).unwrap();
    assert_eq!(store.option("z"), Some(&json!({"y": {"x": {"w": "v"}}})));
    assert_eq!(store.option("z.y.x"), Some(&json!({"w": "v"})));
}

#[test]
fn test_default_resolution_order() {
    let mut store = create_store();
    store.set_default("a", 1).unwrap();
    assert_eq!(store.option("a"), Some(&json!(1)));

    store.set_option("a", 2).unwrap();
    assert_eq!(store.option("a"), Some(&json!(2)));

    store.set_option("a", Value::Null).unwrap();
    assert_eq!(store.option("a"), Some(&Value::Null));

    store.remove_option("a");
    assert_eq!(store.option("a"), Some(&json!(1)));
}

#[test]
fn test_no_option_no_default() {
    let store = create_store();
    assert_eq!(store.option("missing"), None);
    assert_eq!(store.default_for("missing"), None);
}

#[test]
fn test_has_default() {
    let mut store = create_store();
    assert!(!store.has_default("a"));

    store.set_default("a", false).unwrap();
    store.set_default("b", Value::Null).unwrap();
    store.set_default("c.d.e", "f").unwrap();
    assert!(store.has_default("a"));
    assert!(store.has_default("b"));
    assert!(store.has_default("c.d.e"));
    assert!(!store.has_default("a.b.c"));

    assert!(!store.has_option("a"));
}

#[test]
fn test_defaults_feed_predicates() {
    let mut store = create_store();
    store.set_default("verbose", true).unwrap();
    assert!(store.enabled("verbose"));
    assert!(store.is_true("verbose"));

    store.disable("verbose").unwrap();
    assert!(store.disabled("verbose"));
}

#[test]
fn test_clear_keeps_defaults() {
    let mut store = create_store();
    store.set_default("a", "default").unwrap();
    store.set_option("a", "option").unwrap();
    store.clear();
    assert_eq!(store.option("a"), Some(&json!("default")));

    assert_eq!(store.remove_default("a"), Some(json!("default")));
    store.set_default("b", 1).unwrap().clear_defaults();
    assert!(store.defaults().is_empty());
}
