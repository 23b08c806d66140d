//! Property tests: typed messages survive a trip through the wire, and
//! decoding arbitrary text never panics and never depends on hidden state.

use nydus_protocol::{decode, Message, PARSER_ERROR};
use proptest::prelude::*;
use serde_json::Value;

/// Ids may contain anything except the two characters that end them.
fn id() -> impl Strategy<Value = String> {
    "[^~|]{1,32}"
}

fn path() -> impl Strategy<Value = String> {
    "\\PC{1,128}"
}

/// Paths near the length cap, mostly multi-byte so escaping expands them.
fn long_path() -> impl Strategy<Value = String> {
    "[é日😀a ]{1000,1024}"
}

/// JSON has no NaN or infinities, so only finite floats are payloads.
fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |f| f.is_finite())
}

fn payload() -> BoxedStrategy<Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        finite_f64().prop_map(Value::from),
        "\\PC{0,16}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::hash_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
    .boxed()
}

fn message() -> impl Strategy<Value = Message> {
    let data = || prop::option::of(payload());
    prop_oneof![
        Just(Message::welcome()),
        (id(), path(), data()).prop_map(|(id, path, data)| Message::Invoke { id, path, data }),
        (id(), data()).prop_map(|(id, data)| Message::Result { id, data }),
        (id(), data()).prop_map(|(id, data)| Message::Error { id, data }),
        (path(), data()).prop_map(|(path, data)| Message::Publish { path, data }),
    ]
}

proptest! {
    #[test]
    fn prop_round_trip(msg in message()) {
        prop_assert_eq!(decode(&msg.encode()), Ok(msg));
    }

    #[test]
    fn prop_long_multibyte_paths_round_trip(path in long_path()) {
        let msg = Message::publish(path);
        prop_assert_eq!(decode(&msg.encode()), Ok(msg));
    }

    #[test]
    fn prop_floats_round_trip(f in finite_f64()) {
        let msg = Message::result("1").with_data(f);
        prop_assert_eq!(decode(&msg.encode()), Ok(msg));
    }

    #[test]
    fn prop_decode_is_total_and_repeatable(frame in "\\PC{0,64}") {
        let first = decode(&frame);
        prop_assert_eq!(decode(&frame), first);
    }

    #[test]
    fn prop_out_of_range_kind_is_rejected(kind in 5u8..=9, rest in "\\PC{0,32}") {
        prop_assert_eq!(decode(&format!("{kind}{rest}")), Err(PARSER_ERROR));
    }
}
