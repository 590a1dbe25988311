//! Property tests for the write/read cycle and upsert uniqueness

use std::collections::BTreeMap;

use ini_store::storage::format::{parse, serialize};
use ini_store::{Entry, IniStore, UpdateMode, Value};
use proptest::prelude::*;
use tempfile::TempDir;

fn name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_.]{0,8}"
}

fn text_value() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,.!?-]{0,16}"
        .prop_filter("must not look like a number", |s| !ini_store::domain::is_numeric(s))
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        text_value().prop_map(Value::Text),
        (-1.0e6f64..1.0e6).prop_map(Value::Number),
    ]
}

fn pairs() -> impl Strategy<Value = BTreeMap<(String, String), Value>> {
    prop::collection::btree_map((name(), name()), value(), 0..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn values_survive_close_and_reopen(pairs in pairs(), deferred in any::<bool>()) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("props.ini");
        let mode = if deferred { UpdateMode::UpdateOnDispose } else { UpdateMode::UpdateOnAction };

        let mut store = IniStore::open_with_mode(&path, mode).unwrap();
        for ((section, key), value) in &pairs {
            store.set_value(section, key, value.clone()).unwrap();
        }
        store.close().unwrap();

        let mut store = IniStore::open(&path).unwrap();
        for ((section, key), value) in &pairs {
            match value {
                Value::Number(n) => {
                    prop_assert!(store.is_number(section, key).unwrap());
                    prop_assert_eq!(store.get_number(section, key).unwrap(), *n);
                }
                Value::Text(text) => {
                    prop_assert!(!store.is_number(section, key).unwrap());
                    prop_assert_eq!(store.get_string(section, key).unwrap(), Some(text.clone()));
                }
            }
        }
        prop_assert_eq!(store.entries().unwrap().len(), pairs.len());
    }

    #[test]
    fn repeated_sets_keep_one_entry(values in prop::collection::vec(value(), 1..12)) {
        let dir = TempDir::new().unwrap();
        let mut store = IniStore::open_with_mode(dir.path().join("one.ini"), UpdateMode::UpdateOnDispose).unwrap();

        for value in &values {
            store.set_value("S", "K", value.clone()).unwrap();
        }

        let entries = store.entries().unwrap();
        prop_assert_eq!(entries.len(), 1);
        prop_assert_eq!(entries[0].value(), values.last().unwrap());
    }

    #[test]
    fn serialize_parse_is_stable(pairs in pairs()) {
        let entries: Vec<Entry> = pairs
            .iter()
            .map(|((section, key), value)| Entry::new(section, key, value.clone()))
            .collect();

        let text = serialize(&entries);
        let reparsed = parse(&text);

        prop_assert_eq!(reparsed.len(), entries.len());
        for (original, read_back) in entries.iter().zip(&reparsed) {
            prop_assert_eq!(original.section(), read_back.section());
            prop_assert_eq!(original.key(), read_back.key());
            prop_assert_eq!(original.value().to_string(), read_back.value().to_string());
        }
        prop_assert_eq!(serialize(&reparsed), text);
    }
}
