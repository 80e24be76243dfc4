// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use chrono::Utc;
use loopwear_sync::{
  generate_local_id, CollectionItem, CollectionKind, CollectionStore, Feedback, FeedbackSink,
  Identity, ItemCandidate, ItemId, ItemPatch, ItemSnapshot, Severity, StoreSelector, SyncError,
  SyncResult,
};
use parking_lot::Mutex;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;
use uuid::Uuid;

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Fixture data ---

pub fn snapshot(title: &str, price_cents: i32) -> ItemSnapshot {
  ItemSnapshot {
    title: title.to_string(),
    brand: "Fjord & Co".to_string(),
    price_cents,
    size: "M".to_string(),
    condition: "Good".to_string(),
    image_url: format!("https://img.example/{}.jpg", title.replace(' ', "-")),
    description: None,
    sex: None,
    category: None,
  }
}

pub fn candidate(item_id: impl Into<ItemId>, title: &str, price_cents: i32) -> ItemCandidate {
  ItemCandidate {
    item_id: item_id.into(),
    snapshot: snapshot(title, price_cents),
  }
}

pub fn stored_item(item_id: impl Into<ItemId>, title: &str, price_cents: i32, quantity: i32) -> CollectionItem {
  CollectionItem {
    local_id: generate_local_id(),
    item_id: item_id.into(),
    snapshot: snapshot(title, price_cents),
    quantity,
    added_at: Utc::now(),
  }
}

pub fn identity() -> Identity {
  Identity {
    user_id: Uuid::new_v4(),
    email: "buyer@example.com".to_string(),
  }
}

// --- Feedback recording double ---

#[derive(Debug, Default)]
pub struct RecordingSink {
  notices: Mutex<Vec<Feedback>>,
}

impl RecordingSink {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn notices(&self) -> Vec<Feedback> {
    self.notices.lock().clone()
  }

  pub fn last(&self) -> Option<Feedback> {
    self.notices.lock().last().cloned()
  }

  pub fn count_of(&self, severity: Severity) -> usize {
    self.notices.lock().iter().filter(|n| n.severity == severity).count()
  }

  pub fn clear(&self) {
    self.notices.lock().clear();
  }
}

impl FeedbackSink for RecordingSink {
  fn notify(&self, feedback: Feedback) {
    self.notices.lock().push(feedback);
  }
}

// --- Store doubles ---

/// What the next failing operation on a [`CountingStore`] should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedFailure {
  None,
  Transport,
  Constraint,
}

/// In-memory `CollectionStore` double that counts every call and can be
/// armed to fail once. Backend-id adoption is emulated on insert so
/// controller tests exercise the same id handoff the remote adapter
/// performs.
#[derive(Debug)]
pub struct CountingStore {
  pub label: &'static str,
  items: Mutex<Vec<CollectionItem>>,
  failure: Mutex<InjectedFailure>,
  adopt_backend_ids: bool,
  pub list_calls: AtomicUsize,
  pub insert_calls: AtomicUsize,
  pub update_calls: AtomicUsize,
  pub remove_calls: AtomicUsize,
  pub clear_calls: AtomicUsize,
}

impl CountingStore {
  fn build(label: &'static str, adopt_backend_ids: bool) -> Arc<Self> {
    Arc::new(CountingStore {
      label,
      items: Mutex::new(Vec::new()),
      failure: Mutex::new(InjectedFailure::None),
      adopt_backend_ids,
      list_calls: AtomicUsize::new(0),
      insert_calls: AtomicUsize::new(0),
      update_calls: AtomicUsize::new(0),
      remove_calls: AtomicUsize::new(0),
      clear_calls: AtomicUsize::new(0),
    })
  }

  pub fn new(label: &'static str) -> Arc<Self> {
    Self::build(label, false)
  }

  /// Like [`new`](Self::new), but insert substitutes a backend-style row id
  /// for the caller's local token.
  pub fn with_backend_ids(label: &'static str) -> Arc<Self> {
    Self::build(label, true)
  }

  pub fn seed(&self, items: Vec<CollectionItem>) {
    *self.items.lock() = items;
  }

  pub fn stored(&self) -> Vec<CollectionItem> {
    self.items.lock().clone()
  }

  pub fn fail_next(&self, failure: InjectedFailure) {
    *self.failure.lock() = failure;
  }

  pub fn total_calls(&self) -> usize {
    self.list_calls.load(Ordering::SeqCst)
      + self.insert_calls.load(Ordering::SeqCst)
      + self.update_calls.load(Ordering::SeqCst)
      + self.remove_calls.load(Ordering::SeqCst)
      + self.clear_calls.load(Ordering::SeqCst)
  }

  fn take_failure(&self, item_id: &str) -> SyncResult<()> {
    let armed = std::mem::replace(&mut *self.failure.lock(), InjectedFailure::None);
    match armed {
      InjectedFailure::None => Ok(()),
      InjectedFailure::Transport => Err(SyncError::Transport {
        source: anyhow::anyhow!("injected transport failure"),
      }),
      InjectedFailure::Constraint => Err(SyncError::Constraint {
        item_id: item_id.to_string(),
      }),
    }
  }
}

#[async_trait]
impl CollectionStore for CountingStore {
  async fn list(&self) -> SyncResult<Vec<CollectionItem>> {
    self.list_calls.fetch_add(1, Ordering::SeqCst);
    self.take_failure("")?;
    Ok(self.items.lock().clone())
  }

  async fn insert(&self, item: &CollectionItem) -> SyncResult<CollectionItem> {
    self.insert_calls.fetch_add(1, Ordering::SeqCst);
    self.take_failure(item.item_id.as_str())?;
    let mut stored = item.clone();
    if self.adopt_backend_ids {
      stored.local_id = Uuid::new_v4().to_string();
    }
    self.items.lock().push(stored.clone());
    Ok(stored)
  }

  async fn update(&self, local_id: &str, patch: ItemPatch) -> SyncResult<()> {
    self.update_calls.fetch_add(1, Ordering::SeqCst);
    self.take_failure("")?;
    let mut items = self.items.lock();
    let Some(entry) = items.iter_mut().find(|entry| entry.local_id == local_id) else {
      return Err(SyncError::Internal(format!("no row matches id '{local_id}'")));
    };
    if let Some(quantity) = patch.quantity {
      entry.quantity = quantity;
    }
    Ok(())
  }

  async fn remove(&self, local_id: &str) -> SyncResult<()> {
    self.remove_calls.fetch_add(1, Ordering::SeqCst);
    self.take_failure("")?;
    self.items.lock().retain(|entry| entry.local_id != local_id);
    Ok(())
  }

  async fn clear(&self) -> SyncResult<()> {
    self.clear_calls.fetch_add(1, Ordering::SeqCst);
    self.take_failure("")?;
    self.items.lock().clear();
    Ok(())
  }
}

/// Selector double handing out one fixed store per auth mode, so tests can
/// assert backend exclusivity through the call counters.
pub struct TestSelector {
  pub anonymous: Arc<CountingStore>,
  pub authenticated: Arc<CountingStore>,
}

impl TestSelector {
  pub fn new(anonymous: Arc<CountingStore>, authenticated: Arc<CountingStore>) -> Arc<Self> {
    Arc::new(TestSelector { anonymous, authenticated })
  }
}

impl StoreSelector for TestSelector {
  fn select(&self, _kind: CollectionKind, identity: Option<&Identity>) -> Arc<dyn CollectionStore> {
    match identity {
      Some(_) => Arc::clone(&self.authenticated) as Arc<dyn CollectionStore>,
      None => Arc::clone(&self.anonymous) as Arc<dyn CollectionStore>,
    }
  }
}
