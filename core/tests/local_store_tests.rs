// tests/local_store_tests.rs
mod common; // Reference the common module

use common::*;
use loopwear_sync::store::local::{keys, read_flag, write_flag};
use loopwear_sync::{
  CollectionKind, CollectionStore, FileStorage, ItemPatch, LocalStore, MemoryStorage, StoragePort,
  SyncError,
};
use serial_test::serial;
use std::sync::Arc;

#[tokio::test]
#[serial]
async fn test_save_load_round_trip_is_structurally_equal() {
  setup_tracing();
  let port = Arc::new(MemoryStorage::new());
  let store = LocalStore::new(port.clone(), CollectionKind::Cart);

  let items = vec![
    stored_item(1, "Wool overcoat", 4_500, 2),
    stored_item("sku-blue-88", "Denim jacket", 2_100, 1),
  ];
  store.save(&items);
  let first_payload = port.get(keys::CART).unwrap();

  // Loading and re-saving with no intervening mutation rewrites the same
  // JSON (key order aside).
  let loaded = store.load();
  assert_eq!(loaded, items);
  store.save(&loaded);
  let second_payload = port.get(keys::CART).unwrap();

  let first: serde_json::Value = serde_json::from_str(&first_payload).unwrap();
  let second: serde_json::Value = serde_json::from_str(&second_payload).unwrap();
  assert_eq!(first, second);
}

#[tokio::test]
#[serial]
async fn test_absent_key_loads_as_empty() {
  setup_tracing();
  let store = LocalStore::new(Arc::new(MemoryStorage::new()), CollectionKind::Likes);
  assert!(store.load().is_empty());
  assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_corrupted_payload_loads_as_empty() {
  setup_tracing();
  let port = Arc::new(MemoryStorage::new());
  port.set(keys::CART, "{not json[").unwrap();
  let store = LocalStore::new(port.clone(), CollectionKind::Cart);

  assert!(store.load().is_empty());

  // The malformed blob is discarded, not kept around to fail every read;
  // the next save overwrites it.
  store.save(&[stored_item(1, "Wool overcoat", 4_500, 1)]);
  assert_eq!(store.load().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_numeric_item_ids_in_stored_payload_deserialize() {
  setup_tracing();
  let port = Arc::new(MemoryStorage::new());
  // Payload shape written by older storefront builds: numeric item_id.
  let raw = r#"[{
    "local_id": "local-00000000-0000-0000-0000-000000000001",
    "item_id": 42,
    "snapshot": {
      "title": "Wool overcoat",
      "brand": "Fjord & Co",
      "price_cents": 4500,
      "size": "M",
      "condition": "Good",
      "image_url": "https://img.example/overcoat.jpg"
    },
    "quantity": 1,
    "added_at": "2026-07-01T12:00:00Z"
  }]"#;
  port.set(keys::CART, raw).unwrap();
  let store = LocalStore::new(port, CollectionKind::Cart);

  let items = store.load();
  assert_eq!(items.len(), 1);
  assert_eq!(items[0].item_id, 42.into());
  assert_eq!(items[0].item_id, "42".into());
}

#[tokio::test]
#[serial]
async fn test_insert_update_remove_cycle() {
  setup_tracing();
  let store = LocalStore::new(Arc::new(MemoryStorage::new()), CollectionKind::Cart);
  let item = stored_item(1, "Wool overcoat", 4_500, 1);

  let stored = store.insert(&item).await.unwrap();
  // Local storage keeps the caller's generated token id.
  assert_eq!(stored.local_id, item.local_id);

  store
    .update(&item.local_id, ItemPatch { quantity: Some(3) })
    .await
    .unwrap();
  assert_eq!(store.load()[0].quantity, 3);

  store.remove(&item.local_id).await.unwrap();
  assert!(store.load().is_empty());

  // Removing an id that is already gone stays Ok.
  store.remove(&item.local_id).await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_update_unknown_id_fails() {
  setup_tracing();
  let store = LocalStore::new(Arc::new(MemoryStorage::new()), CollectionKind::Cart);
  let result = store.update("local-missing", ItemPatch { quantity: Some(2) }).await;
  assert!(matches!(result, Err(SyncError::Internal(_))));
}

#[tokio::test]
#[serial]
async fn test_clear_removes_the_storage_key() {
  setup_tracing();
  let port = Arc::new(MemoryStorage::new());
  let store = LocalStore::new(port.clone(), CollectionKind::Likes);
  store.save(&[stored_item(1, "Silk scarf", 900, 1)]);
  assert!(port.get(keys::LIKES).is_some());

  store.clear().await.unwrap();
  assert!(port.get(keys::LIKES).is_none());
}

#[tokio::test]
#[serial]
async fn test_collections_use_distinct_keys() {
  setup_tracing();
  let port = Arc::new(MemoryStorage::new());
  let cart = LocalStore::new(port.clone(), CollectionKind::Cart);
  let likes = LocalStore::new(port.clone(), CollectionKind::Likes);

  cart.save(&[stored_item(1, "Wool overcoat", 4_500, 1)]);
  likes.save(&[stored_item(2, "Silk scarf", 900, 1)]);

  assert_eq!(cart.load().len(), 1);
  assert_eq!(likes.load().len(), 1);
  assert!(cart.load()[0].item_id == 1.into());
  assert!(likes.load()[0].item_id == 2.into());
}

#[tokio::test]
#[serial]
async fn test_file_storage_round_trip_and_remove() {
  setup_tracing();
  let root = std::env::temp_dir().join(format!("loopwear-test-{}", uuid::Uuid::new_v4()));
  let port = FileStorage::new(&root);

  assert!(port.get(keys::CART).is_none());
  port.set(keys::CART, "[]").unwrap();
  assert_eq!(port.get(keys::CART).as_deref(), Some("[]"));

  port.remove(keys::CART);
  assert!(port.get(keys::CART).is_none());
  // Removing an absent key is quiet.
  port.remove(keys::CART);

  std::fs::remove_dir_all(&root).ok();
}

#[tokio::test]
#[serial]
async fn test_flag_helpers() {
  setup_tracing();
  let port = MemoryStorage::new();

  assert!(!read_flag(&port, keys::EARLY_ACCESS));
  write_flag(&port, keys::EARLY_ACCESS, true);
  assert!(read_flag(&port, keys::EARLY_ACCESS));
  write_flag(&port, keys::EARLY_ACCESS, false);
  assert!(!read_flag(&port, keys::EARLY_ACCESS));

  // Legacy "1" spelling still reads as set.
  port.set(keys::SESSION_DISMISSED, "1").unwrap();
  assert!(read_flag(&port, keys::SESSION_DISMISSED));
}
