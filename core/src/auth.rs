// core/src/auth.rs

//! Current-identity tracking for backend selection.
//!
//! The provider owns no collection data. A transition (absent -> present or
//! present -> absent) is the sole trigger for a `CollectionController` to
//! reload from the other backend; the embedder observes the previous value
//! returned by [`AuthStateProvider::resolve`] and forwards the transition to
//! each controller it holds.

use parking_lot::RwLock;
use uuid::Uuid;

/// An authenticated storefront user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
  pub user_id: Uuid,
  pub email: String,
}

/// Point-in-time view of the auth state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
  pub identity: Option<Identity>,
  /// True until the first `resolve` call settles the initial session check.
  pub pending: bool,
}

/// Supplies the current authenticated identity (or none) plus an
/// initialization-pending flag.
#[derive(Debug)]
pub struct AuthStateProvider {
  inner: RwLock<AuthSnapshot>,
}

impl AuthStateProvider {
  pub fn new() -> Self {
    AuthStateProvider {
      inner: RwLock::new(AuthSnapshot {
        identity: None,
        pending: true,
      }),
    }
  }

  /// Records the outcome of a session check, sign-in or sign-out and returns
  /// the previous identity so the caller can detect a transition.
  pub fn resolve(&self, identity: Option<Identity>) -> Option<Identity> {
    let mut guard = self.inner.write();
    guard.pending = false;
    std::mem::replace(&mut guard.identity, identity)
  }

  pub fn identity(&self) -> Option<Identity> {
    self.inner.read().identity.clone()
  }

  pub fn is_pending(&self) -> bool {
    self.inner.read().pending
  }

  pub fn snapshot(&self) -> AuthSnapshot {
    self.inner.read().clone()
  }
}

impl Default for AuthStateProvider {
  fn default() -> Self {
    Self::new()
  }
}
