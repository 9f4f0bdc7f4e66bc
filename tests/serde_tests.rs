#![cfg(feature = "serde")]

//! Integration tests for serde support in lazy-iterate.
//!
//! Only [`Metadata`] is serializable; sequences themselves carry a function
//! and are never persisted.

use lazy_iterate::sequence::{Iterate, Metadata};
use rstest::rstest;

// =============================================================================
// Metadata Integration Tests
// =============================================================================

#[rstest]
fn test_metadata_json_roundtrip() {
    let metadata = Metadata::new()
        .insert("source", "counter")
        .insert("owner", "scheduler");

    let json = serde_json::to_string(&metadata).unwrap();
    let restored: Metadata = serde_json::from_str(&json).unwrap();

    assert_eq!(metadata, restored);
}

#[rstest]
fn test_metadata_serializes_as_key_ordered_object() {
    let metadata = Metadata::new().insert("b", "2").insert("a", "1");
    let json = serde_json::to_string(&metadata).unwrap();
    assert_eq!(json, r#"{"a":"1","b":"2"}"#);
}

#[rstest]
fn test_empty_metadata_serializes_as_empty_object() {
    let json = serde_json::to_string(&Metadata::new()).unwrap();
    assert_eq!(json, "{}");
}

#[rstest]
fn test_metadata_rejects_non_string_values() {
    let result: Result<Metadata, _> = serde_json::from_str(r#"{"a":1}"#);
    assert!(result.is_err());
}

#[rstest]
fn test_deserialized_metadata_attaches_to_sequence() {
    let metadata: Metadata = serde_json::from_str(r#"{"name":"naturals"}"#).unwrap();
    let sequence = Iterate::new(|value: &u32| value + 1, 0).with_metadata(metadata);

    assert_eq!(sequence.metadata().get("name"), Some("naturals"));
    assert_eq!(*sequence.drop_first(3).head(), 3);
}
