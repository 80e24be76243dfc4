// tests/collection_tests.rs
mod common; // Reference the common module

use common::*;
use loopwear_sync::{generate_local_id, is_local_id, CollectionItem, ItemId};
use serial_test::serial;

#[test]
#[serial]
fn test_item_id_equality_is_loose_across_representations() {
  setup_tracing();
  assert_eq!(ItemId::from(42), ItemId::from("42"));
  assert_eq!(ItemId::from(42u64), ItemId::from(" 42 "));
  assert_eq!(ItemId::from("-7"), ItemId::from(-7));
  // Leading zeros canonicalize away when the id is numeric.
  assert_eq!(ItemId::from("042"), ItemId::from(42));
  // Non-numeric ids compare as trimmed strings.
  assert_eq!(ItemId::from("sku-blue-88"), ItemId::from(" sku-blue-88 "));
  assert_ne!(ItemId::from("sku-blue-88"), ItemId::from("SKU-BLUE-88"));
}

#[test]
#[serial]
fn test_item_id_deserializes_from_string_and_number() {
  setup_tracing();
  let from_number: ItemId = serde_json::from_str("42").unwrap();
  let from_string: ItemId = serde_json::from_str("\"42\"").unwrap();
  let from_sku: ItemId = serde_json::from_str("\"sku-blue-88\"").unwrap();

  assert_eq!(from_number, from_string);
  assert_eq!(from_sku.as_str(), "sku-blue-88");
}

#[test]
#[serial]
fn test_item_id_serializes_as_plain_string() {
  setup_tracing();
  assert_eq!(serde_json::to_string(&ItemId::from(42)).unwrap(), "\"42\"");
  assert_eq!(
    serde_json::to_string(&ItemId::from("sku-blue-88")).unwrap(),
    "\"sku-blue-88\""
  );
}

#[test]
#[serial]
fn test_local_id_generation_and_predicate() {
  setup_tracing();
  let id = generate_local_id();
  assert!(is_local_id(&id));
  assert_ne!(id, generate_local_id());

  // Backend-shaped ids are not local tokens.
  assert!(!is_local_id("a2f9d9a6-7f1e-4a7e-9f7e-2f7a3b1c5d4e"));
  assert!(!is_local_id(""));
}

#[test]
#[serial]
fn test_from_candidate_defaults() {
  setup_tracing();
  let item = CollectionItem::from_candidate(candidate(42, "Wool overcoat", 4_500));

  assert!(is_local_id(&item.local_id));
  assert_eq!(item.item_id, 42.into());
  assert_eq!(item.quantity, 1);
  assert_eq!(item.snapshot.title, "Wool overcoat");
}

#[test]
#[serial]
fn test_collection_item_json_omits_absent_optional_fields() {
  setup_tracing();
  let item = stored_item(42, "Wool overcoat", 4_500, 1);
  let json = serde_json::to_value(&item).unwrap();
  let snapshot = &json["snapshot"];

  assert!(snapshot.get("description").is_none());
  assert!(snapshot.get("sex").is_none());
  assert!(snapshot.get("category").is_none());
  assert_eq!(snapshot["price_cents"], 4_500);
}
