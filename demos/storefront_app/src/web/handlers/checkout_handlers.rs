// demos/storefront_app/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::services::email::EmailOrderNotifier;
use crate::state::AppState;
use crate::web::handlers::{feedback_json, resolve_session, SessionToken};
use loopwear_sync::{OrderNotification, OrderNotifier};

// --- Request DTO ---
#[derive(Deserialize, Debug)]
pub struct CheckoutRequestPayload {
  pub name: String,
  pub email: String,
  pub phone: String,
  /// Filename of the payment-proof upload. The upload itself is handled by
  /// the hosted-file flow outside this backend; only the name arrives here.
  pub payment_proof_filename: String,
}

#[instrument(name = "handler::checkout", skip(app_state, token, payload), fields(buyer_email = %payload.email))]
pub async fn checkout_handler(
  app_state: web::Data<AppState>,
  token: SessionToken,
  payload: web::Json<CheckoutRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let session = resolve_session(&app_state, &token)?;

  // Hold the cart lock across assembly, send and clear, so a concurrent
  // mutation cannot slip between the snapshot and the wipe.
  let mut cart = session.cart.lock().await;

  let order = OrderNotification::from_cart(
    &payload.name,
    &payload.email,
    &payload.phone,
    cart.items(),
    &payload.payment_proof_filename,
  )?;

  info!(
    "Checkout assembled for session {}: {} items, total {} cents",
    session.token,
    order.items.len(),
    order.total_cents
  );

  let notifier = EmailOrderNotifier::new(
    app_state.config.mock_email_sender.clone(),
    app_state.config.order_inbox.clone(),
  );
  if let Err(err) = notifier.send(&order).await {
    warn!("Order notification failed for session {}: {}", session.token, err);
    return Err(AppError::Email(
      "Couldn't send your order. Please try again in a moment.".to_string(),
    ));
  }

  // The order is on its way; the cart is done. A clear failure here is
  // reported through feedback but does not undo the checkout.
  let cleared = cart.clear().await;
  if !cleared {
    warn!("Cart clear after checkout failed for session {}", session.token);
  }

  Ok(HttpResponse::Ok().json(json!({
      "message": "Order submitted.",
      "total_cents": order.total_cents,
      "item_count": order.items.len(),
      "cart_cleared": cleared,
      "notices": feedback_json(&session.feedback.drain()),
  })))
}
