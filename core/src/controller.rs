// core/src/controller.rs

//! The collection controller: owner of the canonical in-memory list for one
//! collection (cart or likes) during the current session.
//!
//! The controller decides which backend to use from the auth state it is
//! handed, exposes every mutation the UI may perform, and converts every
//! persistence failure into user-facing feedback. No error crosses this
//! boundary as a propagated exception; callers observe booleans and the
//! canonical list.
//!
//! Operations take `&mut self`, so two mutations on one controller cannot
//! overlap; embedders that share a controller across tasks must serialize
//! access (an async mutex around the controller is sufficient).

use crate::auth::Identity;
use crate::collection::{CollectionItem, CollectionKind, ItemCandidate, ItemId};
use crate::error::SyncError;
use crate::feedback::{Feedback, FeedbackSink};
use crate::store::{CollectionStore, ItemPatch, StoreSelector};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Lifecycle of a controller instance.
///
/// A failed load still settles in `Ready` with an empty canonical list;
/// there is no separate error state. The UI gates rendering on
/// [`CollectionController::is_loading`], not on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
  Uninitialized,
  Loading,
  Ready,
}

pub struct CollectionController {
  kind: CollectionKind,
  phase: ControllerPhase,
  items: Vec<CollectionItem>,
  selector: Arc<dyn StoreSelector>,
  store: Arc<dyn CollectionStore>,
  sink: Arc<dyn FeedbackSink>,
}

impl CollectionController {
  /// Builds a controller in the `Uninitialized` phase, pointed at the
  /// anonymous backend. Call [`initialize`](Self::initialize) (or feed an
  /// auth transition) before reading the canonical list.
  pub fn new(kind: CollectionKind, selector: Arc<dyn StoreSelector>, sink: Arc<dyn FeedbackSink>) -> Self {
    let store = selector.select(kind, None);
    CollectionController {
      kind,
      phase: ControllerPhase::Uninitialized,
      items: Vec::new(),
      selector,
      store,
      sink,
    }
  }

  pub fn kind(&self) -> CollectionKind {
    self.kind
  }

  pub fn phase(&self) -> ControllerPhase {
    self.phase
  }

  /// True until the canonical list has been populated (or population has
  /// conclusively failed).
  pub fn is_loading(&self) -> bool {
    self.phase != ControllerPhase::Ready
  }

  /// The canonical list. Exclusively owned and mutated by this controller.
  pub fn items(&self) -> &[CollectionItem] {
    &self.items
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Sum of `quantity * price` over the canonical list, in cents.
  pub fn total_cents(&self) -> i64 {
    self
      .items
      .iter()
      .map(|item| i64::from(item.quantity) * i64::from(item.snapshot.price_cents))
      .sum()
  }

  /// Pure lookup by catalog item id, with loose id comparison (the id may
  /// arrive as a numeric or string representation depending on call site).
  pub fn contains(&self, item_id: impl Into<ItemId>) -> bool {
    let item_id = item_id.into();
    self.items.iter().any(|item| item.item_id == item_id)
  }

  /// Populates the canonical list from the backend matching `identity`.
  pub async fn initialize(&mut self, identity: Option<&Identity>) {
    self.reload(identity).await;
  }

  /// Reacts to an auth transition: swaps the current store and reloads the
  /// canonical list from the new backend. Items from the previous backend
  /// are NOT merged; whatever the new backend holds replaces the list
  /// wholesale. Pre-login local rows stay in local storage, unreachable
  /// until the session is anonymous again.
  pub async fn handle_auth_transition(&mut self, identity: Option<&Identity>) {
    self.reload(identity).await;
  }

  async fn reload(&mut self, identity: Option<&Identity>) {
    self.phase = ControllerPhase::Loading;
    self.store = self.selector.select(self.kind, identity);
    match self.store.list().await {
      Ok(items) => {
        debug!(collection = self.kind.noun(), count = items.len(), "canonical list populated");
        self.items = items;
      }
      Err(err) => {
        error!(collection = self.kind.noun(), error = %err, "failed to populate canonical list");
        self.sink.notify(Feedback::destructive(
          format!("Couldn't load your {}", self.kind.noun()),
          "Please try again in a moment.",
        ));
        self.items = Vec::new();
      }
    }
    self.phase = ControllerPhase::Ready;
  }

  /// Adds a candidate to the collection.
  ///
  /// An item already present increments its quantity (cart) or reports an
  /// "already liked" notice without duplicating state (likes). A new item
  /// is persisted first on the remote path, adopting the backend-assigned
  /// row id; the local path keeps the generated token id. The returned
  /// boolean is the caller's success signal (used to flip "Add" buttons
  /// into their "Added" state); persistence failure yields `false` without
  /// throwing past this boundary.
  pub async fn add(&mut self, candidate: ItemCandidate) -> bool {
    if let Some(existing) = self.items.iter().find(|item| item.item_id == candidate.item_id) {
      return match self.kind {
        CollectionKind::Cart => {
          let local_id = existing.local_id.clone();
          let next_quantity = existing.quantity + 1;
          self.set_quantity(&local_id, next_quantity).await
        }
        CollectionKind::Likes => {
          debug!(item_id = %candidate.item_id, "like skipped: already present");
          self.sink.notify(Feedback::neutral(
            "Already in your likes",
            candidate.snapshot.title.clone(),
          ));
          true
        }
      };
    }

    let title = candidate.snapshot.title.clone();
    let item = CollectionItem::from_candidate(candidate);
    match self.store.insert(&item).await {
      Ok(stored) => {
        info!(collection = self.kind.noun(), item_id = %stored.item_id, "item added");
        self.items.push(stored);
        self.sink.notify(Feedback::neutral(self.added_title(), title));
        true
      }
      // The likes table enforces uniqueness on (user, item); losing the
      // race to another writer is an "already exists", not a failure.
      Err(SyncError::Constraint { .. }) if self.kind == CollectionKind::Likes => {
        debug!(collection = self.kind.noun(), "insert hit uniqueness constraint; treating as already liked");
        self.sink.notify(Feedback::neutral("Already in your likes", title));
        true
      }
      Err(err) => {
        error!(collection = self.kind.noun(), error = %err, "failed to add item");
        self.sink.notify(Feedback::destructive(
          "Couldn't add item",
          "Please try again in a moment.",
        ));
        false
      }
    }
  }

  /// Sets the quantity of one cart entry. A quantity below 1 is rejected
  /// without mutating state (decrementing past 1 is a no-op by contract).
  pub async fn set_quantity(&mut self, local_id: &str, quantity: i32) -> bool {
    if quantity < 1 {
      debug!(collection = self.kind.noun(), local_id, quantity, "quantity below floor; ignoring");
      return false;
    }
    let Some(index) = self.items.iter().position(|item| item.local_id == local_id) else {
      debug!(collection = self.kind.noun(), local_id, "set_quantity: unknown row id");
      return false;
    };
    let patch = ItemPatch {
      quantity: Some(quantity),
    };
    match self.store.update(local_id, patch).await {
      Ok(()) => {
        self.items[index].quantity = quantity;
        true
      }
      Err(err) => {
        error!(collection = self.kind.noun(), local_id, error = %err, "failed to update quantity");
        self.sink.notify(Feedback::destructive(
          "Couldn't update quantity",
          "Please try again in a moment.",
        ));
        false
      }
    }
  }

  /// Removes one entry. The remote adapter skips the round trip entirely
  /// for ids that were never assigned by the backend. Removal feedback is
  /// always reported, even when the persistence call was a no-op; removing
  /// an id that is already gone is not an error.
  pub async fn remove(&mut self, local_id: &str) -> bool {
    match self.store.remove(local_id).await {
      Ok(()) => {
        self.items.retain(|item| item.local_id != local_id);
        self.sink.notify(Feedback::neutral(
          self.removed_title(),
          "The item has been removed.",
        ));
        true
      }
      Err(err) => {
        error!(collection = self.kind.noun(), local_id, error = %err, "failed to remove item");
        self.sink.notify(Feedback::destructive(
          "Couldn't remove item",
          "Please try again in a moment.",
        ));
        false
      }
    }
  }

  /// Wipes the collection on the current backend and empties the canonical
  /// list.
  pub async fn clear(&mut self) -> bool {
    match self.store.clear().await {
      Ok(()) => {
        self.items.clear();
        self.sink.notify(Feedback::neutral(self.cleared_title(), ""));
        true
      }
      Err(err) => {
        error!(collection = self.kind.noun(), error = %err, "failed to clear collection");
        self.sink.notify(Feedback::destructive(
          format!("Couldn't clear your {}", self.kind.noun()),
          "Please try again in a moment.",
        ));
        false
      }
    }
  }

  fn added_title(&self) -> &'static str {
    match self.kind {
      CollectionKind::Cart => "Added to cart",
      CollectionKind::Likes => "Added to likes",
    }
  }

  fn removed_title(&self) -> &'static str {
    match self.kind {
      CollectionKind::Cart => "Removed from cart",
      CollectionKind::Likes => "Removed from likes",
    }
  }

  fn cleared_title(&self) -> &'static str {
    match self.kind {
      CollectionKind::Cart => "Cart cleared",
      CollectionKind::Likes => "Likes cleared",
    }
  }
}

impl std::fmt::Debug for CollectionController {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CollectionController")
      .field("kind", &self.kind)
      .field("phase", &self.phase)
      .field("items", &self.items.len())
      .finish()
  }
}
