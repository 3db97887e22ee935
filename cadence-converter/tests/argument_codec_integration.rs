//! Integration tests for the argument codec
//!
//! These tests drive the codec through its public surface only:
//! 1. Single values and argument arrays round-trip
//! 2. Trailing arguments missing from old payloads get zero values
//! 3. Fallback types bypass the primary converter entirely
//! 4. Diagnostics never change the returned payloads

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use cadence_converter::marker::{LocalActivityMarkerHeader, MarkerHeader};
use cadence_converter::{
    ArgumentCodec, CodecError, CodecEvent, CodecObserver, DataConverter, FallbackSet,
    JsonDataConverter, NoopObserver, Payload, TracingObserver,
};
use proptest::prelude::*;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Order {
    id: String,
    quantity: u32,
    tags: Vec<String>,
}

fn order() -> Order {
    Order {
        id: "order-1".to_string(),
        quantity: 3,
        tags: vec!["express".to_string()],
    }
}

/// Fallback converter that marks everything it writes.
#[derive(Debug, Clone, Copy, Default)]
struct TaggingConverter;

const TAG: &[u8] = b"legacy:";

impl DataConverter for TaggingConverter {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let mut data = TAG.to_vec();
        data.extend(serde_json::to_vec(value)?);
        Ok(data)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError> {
        let body = data
            .strip_prefix(TAG)
            .ok_or_else(|| CodecError::other("missing legacy tag"))?;
        Ok(serde_json::from_slice(body)?)
    }
}

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl CodecObserver for RecordingObserver {
    fn enabled(&self) -> bool {
        true
    }

    fn observe(&self, event: &CodecEvent<'_>) {
        let kind = match event {
            CodecEvent::EncodedSingle { .. } => "encoded_single",
            CodecEvent::EncodedMany { .. } => "encoded_many",
            CodecEvent::EncodedFallback { .. } => "encoded_fallback",
            CodecEvent::Decoded { .. } => "decoded",
            CodecEvent::DecodedFallback { .. } => "decoded_fallback",
            CodecEvent::DecodedArray { .. } => "decoded_array",
            CodecEvent::DecodedArraySingle { .. } => "decoded_array_single",
        };
        self.events
            .lock()
            .unwrap()
            .push(format!("{}:{}", kind, event.payload_text()));
    }
}

fn legacy_codec() -> ArgumentCodec<JsonDataConverter, TaggingConverter> {
    ArgumentCodec::builder().fallback(TaggingConverter).build()
}

#[test]
fn test_single_value_round_trip() {
    let codec = ArgumentCodec::new();

    let payload = codec.to_data(&(order(),)).unwrap();
    assert_eq!(
        payload.as_bytes().unwrap(),
        br#"{"id":"order-1","quantity":3,"tags":["express"]}"#
    );

    let decoded: Option<Order> = codec.from_data(&payload).unwrap();
    assert_eq!(decoded, Some(order()));
}

#[test]
fn test_generic_container_round_trip() {
    let codec = ArgumentCodec::new();
    let mut totals = HashMap::new();
    totals.insert("a".to_string(), vec![1i64, 2]);
    totals.insert("b".to_string(), vec![]);

    let payload = codec.to_data(&(totals.clone(),)).unwrap();
    let decoded: HashMap<String, Vec<i64>> = codec.from_data(&payload).unwrap().unwrap();
    assert_eq!(decoded, totals);
}

#[test]
fn test_two_values_encode_as_array() {
    let codec = ArgumentCodec::new();

    let payload = codec.to_data(&("abc", 42)).unwrap();
    assert_eq!(payload.as_bytes().unwrap(), br#"["abc",42]"#);

    let (name, count): (String, i32) = codec.from_data_array(&payload).unwrap();
    assert_eq!(name, "abc");
    assert_eq!(count, 42);
}

#[test]
fn test_single_value_is_not_array_wrapped() {
    let codec = ArgumentCodec::new();

    let payload = codec.to_data(&("x",)).unwrap();
    assert_eq!(payload.as_bytes().unwrap(), br#""x""#);

    let (name, count): (String, i32) = codec.from_data_array(&payload).unwrap();
    assert_eq!(name, "x");
    assert_eq!(count, 0);
}

#[test]
fn test_trailing_defaults() {
    let codec = ArgumentCodec::new();
    let payload = codec.to_data(&(order(),)).unwrap();

    let (first, count, ratio, flag): (Order, i64, f64, bool) =
        codec.from_data_array(&payload).unwrap();
    assert_eq!(first, order());
    assert_eq!(count, 0);
    assert_eq!(ratio, 0.0);
    assert!(!flag);

    let (first, missing): (Order, Option<Order>) = codec.from_data_array(&payload).unwrap();
    assert_eq!(first, order());
    assert_eq!(missing, None);
}

#[test]
fn test_trailing_argument_without_null_value_fails() {
    let codec = ArgumentCodec::new();
    let payload = codec.to_data(&("x",)).unwrap();

    let err = codec.from_data_array::<(String, String)>(&payload).unwrap_err();
    assert!(matches!(
        err.source,
        CodecError::MissingArgument { index: 1, .. }
    ));
}

#[test]
fn test_extra_payload_elements_are_ignored() {
    let codec = ArgumentCodec::new();
    let payload = codec.to_data(&("a", 1, true)).unwrap();

    let (name, count): (String, i32) = codec.from_data_array(&payload).unwrap();
    assert_eq!((name.as_str(), count), ("a", 1));
}

#[test]
fn test_null_value_gives_empty_payload() {
    let codec = ArgumentCodec::new();

    let payload = codec.to_data(&(None::<String>,)).unwrap();
    assert!(payload.is_empty());

    let decoded: Option<String> = codec.from_data(&payload).unwrap();
    assert_eq!(decoded, None);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Ping;

#[test]
fn test_values_written_as_json_null_are_not_null() {
    let codec = ArgumentCodec::new();

    let payload = codec.to_data(&(Ping,)).unwrap();
    assert_eq!(payload.as_bytes().unwrap(), b"null");
    assert_eq!(codec.from_data::<Ping>(&payload).unwrap(), Some(Ping));
    let (decoded,): (Ping,) = codec.from_data_array(&payload).unwrap();
    assert_eq!(decoded, Ping);

    let payload = codec.to_data(&(serde_json::Value::Null,)).unwrap();
    assert!(!payload.is_empty());
    assert_eq!(
        codec.from_data::<serde_json::Value>(&payload).unwrap(),
        Some(serde_json::Value::Null)
    );

    let payload = codec.to_data(&(Some(Ping),)).unwrap();
    assert_eq!(payload.as_bytes().unwrap(), b"null");

    let payload = codec.to_data(&(&None::<Ping>,)).unwrap();
    assert!(payload.is_empty());
}

#[test]
fn test_no_arguments() {
    let codec = ArgumentCodec::new();

    let payload = codec.to_data(&()).unwrap();
    assert!(payload.is_empty());
    codec.from_data_array::<()>(&payload).unwrap();
    codec.from_data_array::<()>(&Payload::empty()).unwrap();

    let empty: Vec<i32> = Vec::new();
    assert!(codec.to_data(&empty).unwrap().is_empty());
}

#[test]
fn test_empty_payload_with_arguments_expected() {
    let codec = ArgumentCodec::new();

    let err = codec.from_data_array::<(String,)>(&Payload::empty()).unwrap_err();
    assert!(matches!(err.source, CodecError::ArityMismatch { expected: 1 }));
    assert!(err.payload().is_empty());
    assert_eq!(err.type_names(), ["alloc::string::String"]);
}

#[test]
fn test_unit_target_ignores_payload() {
    let codec = ArgumentCodec::new();
    let payload = Payload::new(b"not even json".to_vec());

    let decoded: Option<()> = codec.from_data(&payload).unwrap();
    assert_eq!(decoded, None);
}

#[test]
fn test_arity_one_matches_single_decode() {
    let codec = ArgumentCodec::new();
    let payload = codec.to_data(&(order(),)).unwrap();

    let (from_array,): (Order,) = codec.from_data_array(&payload).unwrap();
    let single: Order = codec.from_data(&payload).unwrap().unwrap();
    assert_eq!(from_array, single);
}

#[test]
fn test_slice_arguments() {
    let codec = ArgumentCodec::new();

    let payload = codec.to_data(&[1u16, 2, 3][..]).unwrap();
    assert_eq!(payload.as_bytes().unwrap(), b"[1,2,3]");

    let payload = codec.to_data(&vec!["only"]).unwrap();
    assert_eq!(payload.as_bytes().unwrap(), br#""only""#);
}

#[test]
fn test_decode_failures_carry_context() {
    let codec = ArgumentCodec::new();
    let payload = Payload::new(br#"["abc","not a number"]"#.to_vec());

    let err = codec.from_data_array::<(String, i32)>(&payload).unwrap_err();
    assert_eq!(err.payload(), &payload);
    assert_eq!(err.type_names(), ["alloc::string::String", "i32"]);
    assert!(matches!(err.source, CodecError::Json(_)));

    let err = codec.from_data::<Order>(&Payload::new(b"{".to_vec())).unwrap_err();
    assert_eq!(err.type_names().len(), 1);
}

#[test]
fn test_encode_failure() {
    let codec = ArgumentCodec::new();
    let mut bad_keys = HashMap::new();
    bad_keys.insert(vec![1u8], 1);

    let err = codec.to_data(&(bad_keys,)).unwrap_err();
    assert_eq!(err.type_names().len(), 1);
    assert!(matches!(err.source, CodecError::Json(_)));
}

#[test]
fn test_fallback_encode_is_verbatim() {
    let codec = legacy_codec();
    let header = LocalActivityMarkerHeader::new("act-1", "echo");

    let payload = codec.to_data(&(header.clone(),)).unwrap();
    let direct = TaggingConverter.encode(&header).unwrap();
    assert_eq!(payload.as_bytes().unwrap(), direct.as_slice());

    let by_ref = codec.to_data(&(&header,)).unwrap();
    assert_eq!(by_ref, payload);
}

#[test]
fn test_fallback_decode_bypasses_primary() {
    let codec = legacy_codec();
    let header = LocalActivityMarkerHeader::new("act-1", "echo");
    let data = TaggingConverter.encode(&header).unwrap();

    let decoded: LocalActivityMarkerHeader =
        codec.from_data(&Payload::new(data.clone())).unwrap().unwrap();
    assert_eq!(decoded, header);

    // The primary converter cannot read the tagged bytes at all.
    assert!(JsonDataConverter::new()
        .decode::<LocalActivityMarkerHeader>(&data)
        .is_err());
}

#[test]
fn test_marker_header_is_not_routed_by_default() {
    let codec = legacy_codec();
    let header = MarkerHeader::new("m-1", 12, 1);

    let payload = codec.to_data(&(header.clone(),)).unwrap();
    assert_eq!(
        payload.as_bytes().unwrap(),
        br#"{"id":"m-1","eventId":12,"accessCount":1}"#
    );
    assert_eq!(codec.from_data::<MarkerHeader>(&payload).unwrap(), Some(header));
}

#[test]
fn test_fallback_not_applied_to_arrays() {
    let codec = legacy_codec();
    let header = LocalActivityMarkerHeader::new("act-1", "echo");

    let payload = codec.to_data(&(header.clone(), 5)).unwrap();
    assert!(!payload.as_bytes().unwrap().starts_with(TAG));

    let (decoded, count): (LocalActivityMarkerHeader, i32) =
        codec.from_data_array(&payload).unwrap();
    assert_eq!(decoded, header);
    assert_eq!(count, 5);
}

#[test]
fn test_from_data_array_single_uses_primary() {
    let codec = legacy_codec();
    let header = LocalActivityMarkerHeader::new("act-1", "echo");
    let payload = codec.to_data(&(header,)).unwrap();

    assert!(codec
        .from_data_array::<(LocalActivityMarkerHeader,)>(&payload)
        .is_err());
}

#[test]
fn test_custom_fallback_set() {
    let codec = ArgumentCodec::builder()
        .fallback(TaggingConverter)
        .fallback_types(FallbackSet::new([std::any::type_name::<Order>()]))
        .build();

    let payload = codec.to_data(&(order(),)).unwrap();
    assert!(payload.as_bytes().unwrap().starts_with(TAG));
    assert_eq!(codec.from_data::<Order>(&payload).unwrap(), Some(order()));

    let header = LocalActivityMarkerHeader::new("act-1", "echo");
    let payload = codec.to_data(&(header,)).unwrap();
    assert!(!payload.as_bytes().unwrap().starts_with(TAG));
}

#[test]
fn test_observer_sees_every_operation() {
    let observer = Arc::new(RecordingObserver::default());
    let codec = ArgumentCodec::builder()
        .fallback(TaggingConverter)
        .observer(observer.clone())
        .build();

    let many = codec.to_data(&("abc", 42)).unwrap();
    let one = codec.to_data(&(7,)).unwrap();
    let legacy = codec
        .to_data(&(LocalActivityMarkerHeader::new("act-1", "echo"),))
        .unwrap();
    codec.from_data::<i32>(&one).unwrap();
    codec.from_data::<LocalActivityMarkerHeader>(&legacy).unwrap();
    codec.from_data_array::<(String, i32)>(&many).unwrap();
    codec.from_data_array::<(i32,)>(&one).unwrap();

    let events = observer.events();
    assert_eq!(events.len(), 7);
    assert_eq!(events[0], r#"encoded_many:["abc",42]"#);
    assert_eq!(events[1], "encoded_single:7");
    assert!(events[2].starts_with("encoded_fallback:legacy:"));
    assert_eq!(events[3], "decoded:7");
    assert!(events[4].starts_with("decoded_fallback:legacy:"));
    assert_eq!(events[5], r#"decoded_array:["abc",42]"#);
    assert_eq!(events[6], "decoded_array_single:7");
}

#[test]
fn test_failed_decodes_are_not_observed() {
    let observer = Arc::new(RecordingObserver::default());
    let codec = ArgumentCodec::builder()
        .fallback(TaggingConverter)
        .observer(observer.clone())
        .build();
    let garbage = Payload::new(b"{".to_vec());

    assert!(codec.from_data::<i32>(&garbage).is_err());
    assert!(codec.from_data::<LocalActivityMarkerHeader>(&garbage).is_err());
    assert!(codec.from_data_array::<(String, i32)>(&garbage).is_err());
    assert!(codec.from_data_array::<(i32,)>(&garbage).is_err());

    assert!(observer.events().is_empty());
}

#[test]
fn test_observer_does_not_change_payloads() {
    let traced = ArgumentCodec::builder()
        .observer(TracingObserver::forced())
        .build();
    let silent = ArgumentCodec::builder().observer(NoopObserver).build();

    let args = ("abc", 42, order());
    assert_eq!(traced.to_data(&args).unwrap(), silent.to_data(&args).unwrap());
    assert_eq!(
        traced.to_data(&(order(),)).unwrap(),
        silent.to_data(&(order(),)).unwrap()
    );
}

#[test]
fn test_codec_is_shared_across_threads() {
    let codec = Arc::new(ArgumentCodec::new());

    std::thread::scope(|scope| {
        for i in 0..8 {
            let codec = Arc::clone(&codec);
            scope.spawn(move || {
                let payload = codec.to_data(&(format!("worker-{i}"), i)).unwrap();
                let (name, index): (String, i32) = codec.from_data_array(&payload).unwrap();
                assert_eq!(name, format!("worker-{i}"));
                assert_eq!(index, i);
            });
        }
    });
}

proptest! {
    #[test]
    fn prop_scalar_round_trip(text in ".*", number in any::<i64>(), flag in any::<bool>()) {
        let codec = ArgumentCodec::new();

        let payload = codec.to_data(&(text.clone(),)).unwrap();
        prop_assert_eq!(codec.from_data::<String>(&payload).unwrap(), Some(text.clone()));

        let payload = codec.to_data(&(text.clone(), number, flag)).unwrap();
        let decoded: (String, i64, bool) = codec.from_data_array(&payload).unwrap();
        prop_assert_eq!(decoded, (text, number, flag));
    }
}
