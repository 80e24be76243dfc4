// core/src/lib.rs

//! Loopwear Sync: the collection persistence layer of the Loopwear thrift
//! storefront.
//!
//! The library keeps a buyer's cart and likes consistent across two very
//! different backends:
//!  - Anonymous sessions persist to a key/value storage port as JSON.
//!  - Authenticated sessions persist to per-user rows in the relational store.
//!  - One controller per collection owns the canonical in-memory list and
//!    swaps backends when the auth state transitions.
//!  - Every persistence failure becomes user-facing feedback; callers see
//!    booleans, never propagated errors.
//!  - The checkout contract assembles and validates the outbound order
//!    notification from the cart.

pub mod auth;
pub mod checkout;
pub mod collection;
pub mod controller;
pub mod error;
pub mod feedback;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::auth::{AuthSnapshot, AuthStateProvider, Identity};
pub use crate::checkout::{OrderNotification, OrderNotifier};
pub use crate::collection::{
  generate_local_id, is_local_id, CollectionItem, CollectionKind, ItemCandidate, ItemId,
  ItemSnapshot,
};
pub use crate::controller::{CollectionController, ControllerPhase};
pub use crate::error::{SyncError, SyncResult};
pub use crate::feedback::{Feedback, FeedbackSink, Severity, TracingFeedback};
pub use crate::store::local::{FileStorage, LocalStore, MemoryStorage, StoragePort};
pub use crate::store::remote::RemoteStore;
pub use crate::store::{BackendSelector, CollectionStore, ItemPatch, StoreSelector};
