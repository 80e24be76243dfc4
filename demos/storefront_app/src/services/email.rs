// demos/storefront_app/src/services/email.rs

//! Mock email delivery, and the order-notification transport built on it.
//!
//! No real provider is wired in; `send_mock_email` logs the message and
//! simulates latency. The order notifier renders an assembled
//! `OrderNotification` into the email the seller would receive.

use crate::errors::{AppError, Result as AppResult};
use async_trait::async_trait;
use loopwear_sync::{OrderNotification, OrderNotifier, SyncError, SyncResult};
use tracing::info;

#[derive(Debug)]
pub struct SentEmailInfo {
  pub to: String,
  pub from: String,
  pub subject: String,
  pub body_preview: String, // First N chars of body
  pub message_id: String,
}

pub async fn send_mock_email(to: &str, from: &str, subject: &str, html_body: &str) -> AppResult<SentEmailInfo> {
  info!(
    "Simulating sending email: To='{}', From='{}', Subject='{}'",
    to, from, subject
  );
  tokio::time::sleep(std::time::Duration::from_millis(20)).await; // Simulate network latency

  // Simulate potential failure
  if subject.to_lowercase().contains("fail_test") {
    tracing::warn!("Simulated email failure for subject: {}", subject);
    return Err(AppError::Email("Simulated email send failure".to_string()));
  }

  let body_preview = html_body.chars().take(50).collect::<String>() + "...";
  let message_id = format!("mock_email_{}", uuid::Uuid::new_v4());
  info!("Mock email sent successfully. Message ID: {}", message_id);

  Ok(SentEmailInfo {
    to: to.to_string(),
    from: from.to_string(),
    subject: subject.to_string(),
    body_preview,
    message_id,
  })
}

/// Sends order notifications to the seller's inbox through the mock email
/// channel. One attempt per order; the caller decides what a failure means.
pub struct EmailOrderNotifier {
  sender: String,
  order_inbox: String,
}

impl EmailOrderNotifier {
  pub fn new(sender: impl Into<String>, order_inbox: impl Into<String>) -> Self {
    EmailOrderNotifier {
      sender: sender.into(),
      order_inbox: order_inbox.into(),
    }
  }

  fn render_body(order: &OrderNotification) -> String {
    let mut lines = vec![
      format!("<p>New order from {} ({}, {})</p>", order.buyer_name, order.buyer_email, order.buyer_phone),
      "<ul>".to_string(),
    ];
    for item in &order.items {
      lines.push(format!(
        "<li>{} x{} ({} {}) {} cents</li>",
        item.snapshot.title, item.quantity, item.snapshot.brand, item.snapshot.size, item.snapshot.price_cents
      ));
    }
    lines.push("</ul>".to_string());
    lines.push(format!("<p>Total: {} cents</p>", order.total_cents));
    lines.push(format!("<p>Payment proof: {}</p>", order.payment_proof_filename));
    lines.join("\n")
  }
}

#[async_trait]
impl OrderNotifier for EmailOrderNotifier {
  async fn send(&self, order: &OrderNotification) -> SyncResult<()> {
    let subject = format!("New Loopwear order from {}", order.buyer_name);
    let body = Self::render_body(order);
    send_mock_email(&self.order_inbox, &self.sender, &subject, &body)
      .await
      .map_err(|err| SyncError::Transport {
        source: anyhow::anyhow!(err),
      })?;
    Ok(())
  }
}
