// core/src/store/mod.rs

//! Storage backends for the collection sync layer.
//!
//! Both backends sit behind one capability interface, [`CollectionStore`].
//! An adapter is constructed already scoped to its owner (a local storage
//! key, or an authenticated user id), so the controller simply holds the
//! "current store" and swaps it on an auth transition — there is no inline
//! branching on auth state per call.

pub mod local;
pub mod remote;

use crate::auth::Identity;
use crate::collection::{CollectionItem, CollectionKind};
use crate::error::SyncResult;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

/// Partial update applied to one stored entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemPatch {
  pub quantity: Option<i32>,
}

/// Capability interface implemented by both the local and the remote
/// backend. All operations are asynchronous, single-attempt, and report
/// failure to the caller instead of retrying; deciding user-facing
/// messaging is the controller's job.
#[async_trait]
pub trait CollectionStore: Send + Sync {
  /// All entries scoped to this adapter's owner.
  async fn list(&self) -> SyncResult<Vec<CollectionItem>>;

  /// Persists one new entry and returns the row as stored, with whatever
  /// row id the backend assigned (local storage keeps the caller's
  /// generated token; the remote backend substitutes its own id).
  async fn insert(&self, item: &CollectionItem) -> SyncResult<CollectionItem>;

  /// Applies a partial update to one entry. Fails if no row matches.
  async fn update(&self, local_id: &str, patch: ItemPatch) -> SyncResult<()>;

  /// Deletes one entry. Idempotent: removing an id that is no longer
  /// present is not an error.
  async fn remove(&self, local_id: &str) -> SyncResult<()>;

  /// Deletes every entry scoped to this adapter's owner.
  async fn clear(&self) -> SyncResult<()>;
}

/// Chooses the backing store for a collection given the current identity.
///
/// The closed set of two adapters lives behind this seam so tests can swap
/// in counting doubles without a database or a real storage port.
pub trait StoreSelector: Send + Sync {
  fn select(&self, kind: CollectionKind, identity: Option<&Identity>) -> Arc<dyn CollectionStore>;
}

/// Production selector: local storage for anonymous sessions, the
/// relational store for authenticated ones.
pub struct BackendSelector {
  port: Arc<dyn local::StoragePort>,
  pool: PgPool,
}

impl BackendSelector {
  pub fn new(port: Arc<dyn local::StoragePort>, pool: PgPool) -> Self {
    BackendSelector { port, pool }
  }
}

impl StoreSelector for BackendSelector {
  fn select(&self, kind: CollectionKind, identity: Option<&Identity>) -> Arc<dyn CollectionStore> {
    match identity {
      Some(identity) => Arc::new(remote::RemoteStore::new(self.pool.clone(), identity.user_id, kind)),
      None => Arc::new(local::LocalStore::new(Arc::clone(&self.port), kind)),
    }
  }
}
