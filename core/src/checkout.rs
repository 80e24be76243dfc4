// core/src/checkout.rs

//! Checkout contract: the order-notification payload and the outbound
//! notifier seam.
//!
//! The library owns the payload shape and its field validation; how the
//! notification actually leaves the process (email, webhook, queue) is the
//! embedder's business, injected through [`OrderNotifier`]. The call is
//! fire-and-once: one attempt, a success/failure result, no retries and no
//! response payload.

use crate::collection::CollectionItem;
use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything the seller needs to fulfil one order, captured at the moment
/// the buyer submits checkout. The item list is a snapshot of the cart;
/// later cart mutations do not affect an already-built notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderNotification {
  pub buyer_name: String,
  pub buyer_email: String,
  pub buyer_phone: String,
  pub items: Vec<CollectionItem>,
  /// Sum of `quantity * price` over `items`, in cents.
  pub total_cents: i64,
  /// Filename of the payment-proof image the buyer uploaded. The file
  /// itself travels out of band; only the name rides along here.
  pub payment_proof_filename: String,
}

impl OrderNotification {
  /// Builds a notification from the buyer's form fields and the current
  /// cart. Validation rejects before anything is persisted or sent, and
  /// each rejection names the offending field so the UI can point at it.
  pub fn from_cart(
    buyer_name: &str,
    buyer_email: &str,
    buyer_phone: &str,
    items: &[CollectionItem],
    payment_proof_filename: &str,
  ) -> SyncResult<Self> {
    let buyer_name = required_field("name", buyer_name)?;
    let buyer_email = required_field("email", buyer_email)?;
    if !buyer_email.contains('@') {
      return Err(SyncError::Validation(
        "email must be a valid address".to_string(),
      ));
    }
    let buyer_phone = required_field("phone", buyer_phone)?;
    let payment_proof_filename = required_field("payment proof", payment_proof_filename)?;
    if items.is_empty() {
      return Err(SyncError::Validation("cart is empty".to_string()));
    }

    let total_cents = items
      .iter()
      .map(|item| i64::from(item.quantity) * i64::from(item.snapshot.price_cents))
      .sum();
    debug!(item_count = items.len(), total_cents, "order notification assembled");

    Ok(OrderNotification {
      buyer_name,
      buyer_email,
      buyer_phone,
      items: items.to_vec(),
      total_cents,
      payment_proof_filename,
    })
  }
}

fn required_field(field: &str, value: &str) -> SyncResult<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(SyncError::Validation(format!("{field} is required")));
  }
  Ok(trimmed.to_string())
}

/// Outbound transport for an assembled order notification.
#[async_trait]
pub trait OrderNotifier: Send + Sync {
  /// Delivers the notification once. Implementations report failure to the
  /// caller rather than retrying.
  async fn send(&self, order: &OrderNotification) -> SyncResult<()>;
}
