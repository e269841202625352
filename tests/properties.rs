//! Property-based tests for path writes, default fallback and flag output.

mod common;
use common::create_store;
use proptest::prelude::*;
use serde_json::{json, Value};

/// Segment names that never collide with the negation prefix.
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-m][a-z0-9_]{0,8}"
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

proptest! {
    #[test]
    fn prop_scalar_round_trip(key in segment_strategy(), value in scalar_strategy()) {
        let mut store = create_store();
        store.set_option(key.as_str(), value.clone()).unwrap();
        prop_assert_eq!(store.option(key.as_str()), Some(&value));
        prop_assert!(store.has_option(key.as_str()));
    }

    #[test]
    fn prop_dotted_write_nests(
        segments in prop::collection::vec(segment_strategy(), 1..5),
        value in scalar_strategy(),
    ) {
        let mut store = create_store();
        let path = segments.join(".");
        store.set_option(path.as_str(), value.clone()).unwrap();

        let expected = segments[1..]
            .iter()
            .rev()
            .fold(value.clone(), |inner, segment| {
                let mut map = serde_json::Map::new();
                map.insert(segment.clone(), inner);
                Value::Object(map)
            });
        prop_assert_eq!(store.option(segments[0].as_str()), Some(&expected));
        prop_assert_eq!(store.option(segments.clone()), Some(&value));
    }

    #[test]
    fn prop_default_only_fills_absent(
        key in segment_strategy(),
        default in scalar_strategy(),
        option in prop::option::of(scalar_strategy()),
    ) {
        let mut store = create_store();
        store.set_default(key.as_str(), default.clone()).unwrap();
        if let Some(option) = &option {
            store.set_option(key.as_str(), option.clone()).unwrap();
        }
        let expected = option.as_ref().unwrap_or(&default);
        prop_assert_eq!(store.option(key.as_str()), Some(expected));
    }

    #[test]
    fn prop_first_fill_wins(key in segment_strategy(), first in scalar_strategy(), second in scalar_strategy()) {
        let mut store = create_store();
        store.fill_in(key.as_str(), first.clone()).unwrap();
        store.fill_in(key.as_str(), second).unwrap();
        prop_assert_eq!(store.option(key.as_str()), Some(&first));
    }

    #[test]
    fn prop_boolean_flags(values in prop::collection::btree_map(segment_strategy(), any::<bool>(), 0..8)) {
        let mut store = create_store();
        for (key, value) in &values {
            store.set_option(key.as_str(), *value).unwrap();
        }
        let expected: Vec<String> = values
            .iter()
            .map(|(key, on)| if *on { format!("--{}", key) } else { format!("--no-{}", key) })
            .collect();
        prop_assert_eq!(store.flags(), expected);
    }
}
