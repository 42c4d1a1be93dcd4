//! Property tests: storing any JSON-representable value and reading it back
//! must be lossless, bare or namespaced.

use proptest::prelude::*;
use serde_json::Value;

use satchel::Storage;

/// Arbitrary JSON values: null, bools, integers, short strings, and
/// shallow arrays/objects of the same. Floats are deliberately excluded;
/// JSON text is not a lossless float encoding.
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 _-]{0,24}".prop_map(Value::from),
    ];

    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("build runtime")
}

proptest! {
    #[test]
    fn set_then_get_round_trips(key in "[a-zA-Z0-9_.:-]{1,32}", value in json_value()) {
        runtime().block_on(async {
            let storage = Storage::in_memory();

            storage.set_item(&key, &value).await.unwrap();
            let read: Option<Value> = storage.get_item(&key).await.unwrap();

            prop_assert_eq!(read, Some(value));
            Ok(())
        })?;
    }

    #[test]
    fn namespaced_round_trip_matches_effective_key(
        prefix in "[a-z]{1,8}:",
        key in "[a-zA-Z0-9_-]{1,16}",
        value in json_value(),
    ) {
        runtime().block_on(async {
            let storage = Storage::in_memory();
            let view = storage.scoped(prefix.clone());

            view.set_item(&key, &value).await.unwrap();

            let via_view: Option<Value> = view.get_item(&key).await.unwrap();
            let via_effective: Option<Value> =
                storage.get_item(&format!("{}{}", prefix, key)).await.unwrap();

            prop_assert_eq!(via_view, Some(value.clone()));
            prop_assert_eq!(via_effective, Some(value));
            Ok(())
        })?;
    }

    #[test]
    fn remove_always_restores_absence(key in "[a-zA-Z0-9_-]{1,16}", value in json_value()) {
        runtime().block_on(async {
            let storage = Storage::in_memory();

            storage.set_item(&key, &value).await.unwrap();
            storage.remove_item(&key).await.unwrap();

            let read: Option<Value> = storage.get_item(&key).await.unwrap();
            prop_assert_eq!(read, None);
            Ok(())
        })?;
    }
}
