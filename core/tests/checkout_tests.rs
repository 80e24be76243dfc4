// tests/checkout_tests.rs
mod common; // Reference the common module

use common::*;
use loopwear_sync::{OrderNotification, SyncError};
use serial_test::serial;

fn cart_fixture() -> Vec<loopwear_sync::CollectionItem> {
  vec![
    stored_item(1, "Wool overcoat", 4_500, 2),
    stored_item(2, "Denim jacket", 2_100, 1),
  ]
}

fn validation_message(result: Result<OrderNotification, SyncError>) -> String {
  match result {
    Err(SyncError::Validation(message)) => message,
    other => panic!("expected a validation rejection, got {other:?}"),
  }
}

#[test]
#[serial]
fn test_from_cart_assembles_payload_and_total() {
  setup_tracing();
  let items = cart_fixture();

  let order = OrderNotification::from_cart(
    "  Astrid Berg  ",
    "astrid@example.com",
    "+47 400 00 000",
    &items,
    "proof-7781.jpg",
  )
  .unwrap();

  assert_eq!(order.buyer_name, "Astrid Berg");
  assert_eq!(order.buyer_email, "astrid@example.com");
  assert_eq!(order.items, items);
  assert_eq!(order.total_cents, 2 * 4_500 + 2_100);
  assert_eq!(order.payment_proof_filename, "proof-7781.jpg");
}

#[test]
#[serial]
fn test_rejections_name_the_offending_field() {
  setup_tracing();
  let items = cart_fixture();

  let message = validation_message(OrderNotification::from_cart(
    "  ",
    "astrid@example.com",
    "+47 400 00 000",
    &items,
    "proof.jpg",
  ));
  assert_eq!(message, "name is required");

  let message = validation_message(OrderNotification::from_cart(
    "Astrid Berg",
    "",
    "+47 400 00 000",
    &items,
    "proof.jpg",
  ));
  assert_eq!(message, "email is required");

  let message = validation_message(OrderNotification::from_cart(
    "Astrid Berg",
    "not-an-address",
    "+47 400 00 000",
    &items,
    "proof.jpg",
  ));
  assert_eq!(message, "email must be a valid address");

  let message = validation_message(OrderNotification::from_cart(
    "Astrid Berg",
    "astrid@example.com",
    "",
    &items,
    "proof.jpg",
  ));
  assert_eq!(message, "phone is required");

  let message = validation_message(OrderNotification::from_cart(
    "Astrid Berg",
    "astrid@example.com",
    "+47 400 00 000",
    &items,
    "   ",
  ));
  assert_eq!(message, "payment proof is required");
}

#[test]
#[serial]
fn test_empty_cart_is_rejected() {
  setup_tracing();
  let message = validation_message(OrderNotification::from_cart(
    "Astrid Berg",
    "astrid@example.com",
    "+47 400 00 000",
    &[],
    "proof.jpg",
  ));
  assert_eq!(message, "cart is empty");
}

#[test]
#[serial]
fn test_notification_snapshot_is_detached_from_the_cart() {
  setup_tracing();
  let mut items = cart_fixture();

  let order = OrderNotification::from_cart(
    "Astrid Berg",
    "astrid@example.com",
    "+47 400 00 000",
    &items,
    "proof.jpg",
  )
  .unwrap();

  // Mutating the cart after assembly does not reach into the notification.
  items[0].quantity = 99;
  assert_eq!(order.items[0].quantity, 2);
  assert_eq!(order.total_cents, 2 * 4_500 + 2_100);
}
