// core/src/store/local.rs

//! Local (anonymous-mode) persistence: one JSON array per collection under a
//! fixed storage key.
//!
//! The storage itself is an explicitly injected [`StoragePort`] rather than
//! an ambient global, so the adapter stays testable without a real
//! browser-style storage implementation. A save rewrites the full array and
//! is all-or-nothing at the port level; there is no rollback on failure
//! beyond logging.

use crate::collection::{CollectionItem, CollectionKind};
use crate::error::{SyncError, SyncResult};
use crate::store::{CollectionStore, ItemPatch};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fixed storage keys. There is no schema version field: a format change
/// means the old key simply stops matching what the new code expects.
pub mod keys {
  pub const CART: &str = "loopwear.cart";
  pub const LIKES: &str = "loopwear.likes";
  pub const EARLY_ACCESS: &str = "loopwear.early_access";
  pub const SESSION_DISMISSED: &str = "loopwear.session_dismissed";
}

/// Minimal key/value port over browser-style persistent storage.
pub trait StoragePort: Send + Sync {
  /// Returns the stored string, or `None` when the key is absent or the
  /// underlying read failed.
  fn get(&self, key: &str) -> Option<String>;

  fn set(&self, key: &str, value: &str) -> std::io::Result<()>;

  fn remove(&self, key: &str);
}

/// Reads a boolean flag key (early-access gate, session-dismiss marker).
pub fn read_flag(port: &dyn StoragePort, key: &str) -> bool {
  matches!(port.get(key).as_deref(), Some("true") | Some("1"))
}

/// Writes a boolean flag key. Write failures are logged and dropped.
pub fn write_flag(port: &dyn StoragePort, key: &str, value: bool) {
  if let Err(err) = port.set(key, if value { "true" } else { "false" }) {
    warn!(key, error = %err, "failed to persist flag");
  }
}

/// In-memory port, used by tests and as a scratch store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

impl StoragePort for MemoryStorage {
  fn get(&self, key: &str) -> Option<String> {
    self.entries.lock().get(key).cloned()
  }

  fn set(&self, key: &str, value: &str) -> std::io::Result<()> {
    self.entries.lock().insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) {
    self.entries.lock().remove(key);
  }
}

/// File-backed port: one file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
  root: PathBuf,
}

impl FileStorage {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    FileStorage { root: root.into() }
  }

  fn path_for(&self, key: &str) -> PathBuf {
    // Keys are dotted lowercase identifiers; a flat file per key suffices.
    self.root.join(format!("{key}.json"))
  }
}

impl StoragePort for FileStorage {
  fn get(&self, key: &str) -> Option<String> {
    match std::fs::read_to_string(self.path_for(key)) {
      Ok(contents) => Some(contents),
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
      Err(err) => {
        warn!(key, error = %err, "failed to read storage file");
        None
      }
    }
  }

  fn set(&self, key: &str, value: &str) -> std::io::Result<()> {
    std::fs::create_dir_all(&self.root)?;
    std::fs::write(self.path_for(key), value)
  }

  fn remove(&self, key: &str) {
    if let Err(err) = std::fs::remove_file(self.path_for(key)) {
      if err.kind() != std::io::ErrorKind::NotFound {
        warn!(key, error = %err, "failed to remove storage file");
      }
    }
  }
}

/// The anonymous-mode adapter. Never touched while an identity is present.
pub struct LocalStore {
  port: Arc<dyn StoragePort>,
  kind: CollectionKind,
}

impl LocalStore {
  pub fn new(port: Arc<dyn StoragePort>, kind: CollectionKind) -> Self {
    LocalStore { port, kind }
  }

  fn key(&self) -> &'static str {
    self.kind.storage_key()
  }

  /// Parses the stored JSON blob for this collection. Absent key or a parse
  /// failure both come back as an empty list; the parse failure is logged
  /// and swallowed, never surfaced.
  pub fn load(&self) -> Vec<CollectionItem> {
    let Some(raw) = self.port.get(self.key()) else {
      return Vec::new();
    };
    match serde_json::from_str::<Vec<CollectionItem>>(&raw) {
      Ok(items) => items,
      Err(source) => {
        let err = SyncError::Serialization {
          key: self.key().to_string(),
          source,
        };
        warn!(collection = self.kind.noun(), error = %err, "discarding malformed stored payload");
        Vec::new()
      }
    }
  }

  /// Serializes and rewrites the full list, overwriting prior contents.
  pub fn save(&self, items: &[CollectionItem]) {
    let payload = match serde_json::to_string(items) {
      Ok(payload) => payload,
      Err(err) => {
        warn!(collection = self.kind.noun(), error = %err, "failed to serialize collection");
        return;
      }
    };
    if let Err(err) = self.port.set(self.key(), &payload) {
      warn!(collection = self.kind.noun(), error = %err, "failed to write collection");
    }
  }
}

#[async_trait]
impl CollectionStore for LocalStore {
  async fn list(&self) -> SyncResult<Vec<CollectionItem>> {
    Ok(self.load())
  }

  async fn insert(&self, item: &CollectionItem) -> SyncResult<CollectionItem> {
    let mut items = self.load();
    items.push(item.clone());
    self.save(&items);
    Ok(item.clone())
  }

  async fn update(&self, local_id: &str, patch: ItemPatch) -> SyncResult<()> {
    let mut items = self.load();
    let Some(entry) = items.iter_mut().find(|entry| entry.local_id == local_id) else {
      return Err(SyncError::Internal(format!(
        "no stored {} row matches id '{local_id}'",
        self.kind.noun()
      )));
    };
    if let Some(quantity) = patch.quantity {
      entry.quantity = quantity;
    }
    self.save(&items);
    Ok(())
  }

  async fn remove(&self, local_id: &str) -> SyncResult<()> {
    let mut items = self.load();
    let before = items.len();
    items.retain(|entry| entry.local_id != local_id);
    if items.len() == before {
      debug!(collection = self.kind.noun(), local_id, "remove: id already absent");
    }
    self.save(&items);
    Ok(())
  }

  async fn clear(&self) -> SyncResult<()> {
    self.port.remove(self.key());
    Ok(())
  }
}
