// demos/storefront_app/src/models/product.rs

use chrono::{DateTime, Utc};
use loopwear_sync::{ItemCandidate, ItemId, ItemSnapshot};
use serde::Serialize;
use sqlx::FromRow;

/// One thrift listing. Listings are single-unit: a sold listing stays in the
/// table with `sold = true` so old carts and likes keep resolving.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
  pub id: i64,
  pub title: String,
  pub brand: String,
  pub description: Option<String>, // Description can be optional
  pub price_cents: i32,
  pub size: String,
  pub condition: String,
  pub sex: Option<String>,
  pub category: Option<String>,
  pub image_url: String,
  pub sold: bool,
  pub created_at: DateTime<Utc>,
}

impl Product {
  /// Denormalized display copy captured at add/like time.
  pub fn to_snapshot(&self) -> ItemSnapshot {
    ItemSnapshot {
      title: self.title.clone(),
      brand: self.brand.clone(),
      price_cents: self.price_cents,
      size: self.size.clone(),
      condition: self.condition.clone(),
      image_url: self.image_url.clone(),
      description: self.description.clone(),
      sex: self.sex.clone(),
      category: self.category.clone(),
    }
  }

  pub fn to_candidate(&self) -> ItemCandidate {
    ItemCandidate {
      item_id: ItemId::from(self.id),
      snapshot: self.to_snapshot(),
    }
  }
}
