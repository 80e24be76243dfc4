// core/src/collection.rs

//! Data model shared by the cart and likes collections.

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Prefix tagging locally generated row ids, distinguishing them from ids
/// assigned by the remote backend.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Generates a row id for an entry that has only ever lived in local storage.
pub fn generate_local_id() -> String {
  format!("{}{}", LOCAL_ID_PREFIX, Uuid::new_v4())
}

/// True if `local_id` carries the local-generated token shape, i.e. the row
/// was never assigned an id by the remote backend.
pub fn is_local_id(local_id: &str) -> bool {
  local_id.starts_with(LOCAL_ID_PREFIX)
}

/// Identifier of the underlying catalog item.
///
/// Call sites hand these over as either a numeric or a string representation,
/// so equality is loose: the raw value is normalized once at construction
/// (trimmed, and canonicalized to decimal when it parses as an integer).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
  pub fn as_str(&self) -> &str {
    &self.0
  }

  fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
      Ok(n) => n.to_string(),
      Err(_) => trimmed.to_string(),
    }
  }
}

impl From<&str> for ItemId {
  fn from(raw: &str) -> Self {
    ItemId(Self::normalize(raw))
  }
}

impl From<String> for ItemId {
  fn from(raw: String) -> Self {
    ItemId(Self::normalize(&raw))
  }
}

impl From<i64> for ItemId {
  fn from(raw: i64) -> Self {
    ItemId(raw.to_string())
  }
}

impl From<u64> for ItemId {
  fn from(raw: u64) -> Self {
    ItemId(raw.to_string())
  }
}

impl fmt::Display for ItemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// Stored payloads written by older storefront builds carried numeric item
// ids, so deserialization accepts both shapes.
impl<'de> Deserialize<'de> for ItemId {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    struct ItemIdVisitor;

    impl Visitor<'_> for ItemIdVisitor {
      type Value = ItemId;

      fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or integer catalog item id")
      }

      fn visit_str<E: de::Error>(self, v: &str) -> Result<ItemId, E> {
        Ok(ItemId::from(v))
      }

      fn visit_i64<E: de::Error>(self, v: i64) -> Result<ItemId, E> {
        Ok(ItemId::from(v))
      }

      fn visit_u64<E: de::Error>(self, v: u64) -> Result<ItemId, E> {
        Ok(ItemId(v.to_string()))
      }
    }

    deserializer.deserialize_any(ItemIdVisitor)
  }
}

/// Denormalized copy of a catalog item's display fields, captured at the time
/// of the add/like action. The collection never re-fetches current catalog
/// data, so a snapshot can drift from the live listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
  pub title: String,
  pub brand: String,
  pub price_cents: i32,
  pub size: String,
  pub condition: String,
  pub image_url: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sex: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
}

/// A candidate handed to `CollectionController::add` by the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCandidate {
  pub item_id: ItemId,
  pub snapshot: ItemSnapshot,
}

/// One entry in a collection's canonical list.
///
/// `quantity` is meaningful for the cart (always >= 1); the likes collection
/// pins it to 1 and reads `added_at` as the like timestamp. Both collections
/// share one shape so the two backends can serialize them uniformly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionItem {
  pub local_id: String,
  pub item_id: ItemId,
  pub snapshot: ItemSnapshot,
  pub quantity: i32,
  pub added_at: DateTime<Utc>,
}

impl CollectionItem {
  /// Builds a fresh entry for a candidate, with a locally generated row id.
  /// The remote adapter replaces the id with the backend-assigned one on
  /// insert; the local adapter keeps the token as-is.
  pub fn from_candidate(candidate: ItemCandidate) -> Self {
    CollectionItem {
      local_id: generate_local_id(),
      item_id: candidate.item_id,
      snapshot: candidate.snapshot,
      quantity: 1,
      added_at: Utc::now(),
    }
  }
}

/// The two structurally parallel collections handled by the sync layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
  Cart,
  Likes,
}

impl CollectionKind {
  /// Fixed local-storage key for this collection's JSON array.
  pub fn storage_key(&self) -> &'static str {
    match self {
      CollectionKind::Cart => crate::store::local::keys::CART,
      CollectionKind::Likes => crate::store::local::keys::LIKES,
    }
  }

  /// Short noun used in logs and feedback copy.
  pub fn noun(&self) -> &'static str {
    match self {
      CollectionKind::Cart => "cart",
      CollectionKind::Likes => "likes",
    }
  }
}
