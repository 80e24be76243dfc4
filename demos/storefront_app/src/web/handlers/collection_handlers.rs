// demos/storefront_app/src/web/handlers/collection_handlers.rs

//! Cart and likes endpoints. The two collections share one handler core;
//! the routes bind the collection kind.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::models::Product;
use crate::sessions::Session;
use crate::state::AppState;
use crate::web::handlers::{feedback_json, resolve_session, SessionToken};
use loopwear_sync::{CollectionController, CollectionKind};
use tokio::sync::Mutex;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct AddItemRequestPayload {
  pub product_id: i64,
}

#[derive(Deserialize, Debug)]
pub struct UpdateQuantityPayload {
  pub quantity: i32,
}

fn controller_for(session: &Session, kind: CollectionKind) -> &Mutex<CollectionController> {
  match kind {
    CollectionKind::Cart => &session.cart,
    CollectionKind::Likes => &session.likes,
  }
}

fn collection_response(controller: &CollectionController, session: &Session, ok: bool) -> HttpResponse {
  let body = json!({
    "ok": ok,
    "items": controller.items(),
    "total_cents": controller.total_cents(),
    "notices": feedback_json(&session.feedback.drain()),
  });
  if ok {
    HttpResponse::Ok().json(body)
  } else {
    HttpResponse::UnprocessableEntity().json(body)
  }
}

async fn fetch_listing(app_state: &AppState, product_id: i64) -> Result<Product, AppError> {
  let product_opt: Option<Product> = sqlx::query_as(
    "SELECT id, title, brand, description, price_cents, size, condition, sex, category, image_url, sold, created_at \
     FROM products WHERE id = $1",
  )
  .bind(product_id)
  .fetch_optional(&app_state.db_pool)
  .await?;

  product_opt.ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found.", product_id)))
}

// --- Shared handler cores ---

async fn list_collection(
  app_state: web::Data<AppState>,
  token: SessionToken,
  kind: CollectionKind,
) -> Result<HttpResponse, AppError> {
  let session = resolve_session(&app_state, &token)?;
  let controller = controller_for(&session, kind).lock().await;
  Ok(collection_response(&controller, &session, true))
}

async fn add_item(
  app_state: web::Data<AppState>,
  token: SessionToken,
  kind: CollectionKind,
  product_id: i64,
) -> Result<HttpResponse, AppError> {
  let session = resolve_session(&app_state, &token)?;
  let product = fetch_listing(&app_state, product_id).await?;
  if product.sold && kind == CollectionKind::Cart {
    warn!(product_id, "Rejecting cart add for a sold listing.");
    return Err(AppError::Validation(format!(
      "Listing '{}' has already been sold.",
      product.title
    )));
  }

  let mut controller = controller_for(&session, kind).lock().await;
  let ok = controller.add(product.to_candidate()).await;
  info!(
    "Add to {} for session {}: product {}, ok={}",
    kind.noun(),
    session.token,
    product_id,
    ok
  );
  Ok(collection_response(&controller, &session, ok))
}

async fn update_quantity(
  app_state: web::Data<AppState>,
  token: SessionToken,
  kind: CollectionKind,
  local_id: String,
  quantity: i32,
) -> Result<HttpResponse, AppError> {
  let session = resolve_session(&app_state, &token)?;
  let mut controller = controller_for(&session, kind).lock().await;
  let ok = controller.set_quantity(&local_id, quantity).await;
  Ok(collection_response(&controller, &session, ok))
}

async fn remove_item(
  app_state: web::Data<AppState>,
  token: SessionToken,
  kind: CollectionKind,
  local_id: String,
) -> Result<HttpResponse, AppError> {
  let session = resolve_session(&app_state, &token)?;
  let mut controller = controller_for(&session, kind).lock().await;
  let ok = controller.remove(&local_id).await;
  Ok(collection_response(&controller, &session, ok))
}

async fn clear_collection(
  app_state: web::Data<AppState>,
  token: SessionToken,
  kind: CollectionKind,
) -> Result<HttpResponse, AppError> {
  let session = resolve_session(&app_state, &token)?;
  let mut controller = controller_for(&session, kind).lock().await;
  let ok = controller.clear().await;
  Ok(collection_response(&controller, &session, ok))
}

// --- Cart handlers ---

#[instrument(name = "handler::get_cart", skip(app_state, token))]
pub async fn get_cart_handler(app_state: web::Data<AppState>, token: SessionToken) -> Result<HttpResponse, AppError> {
  list_collection(app_state, token, CollectionKind::Cart).await
}

#[instrument(name = "handler::add_to_cart", skip(app_state, token, payload), fields(product_id = payload.product_id))]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  token: SessionToken,
  payload: web::Json<AddItemRequestPayload>,
) -> Result<HttpResponse, AppError> {
  add_item(app_state, token, CollectionKind::Cart, payload.product_id).await
}

#[instrument(
  name = "handler::update_cart_quantity",
  skip(app_state, token, path, payload),
  fields(local_id = %path.as_ref(), quantity = payload.quantity)
)]
pub async fn update_cart_quantity_handler(
  app_state: web::Data<AppState>,
  token: SessionToken,
  path: web::Path<String>,
  payload: web::Json<UpdateQuantityPayload>,
) -> Result<HttpResponse, AppError> {
  update_quantity(
    app_state,
    token,
    CollectionKind::Cart,
    path.into_inner(),
    payload.quantity,
  )
  .await
}

#[instrument(name = "handler::remove_from_cart", skip(app_state, token, path), fields(local_id = %path.as_ref()))]
pub async fn remove_from_cart_handler(
  app_state: web::Data<AppState>,
  token: SessionToken,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  remove_item(app_state, token, CollectionKind::Cart, path.into_inner()).await
}

#[instrument(name = "handler::clear_cart", skip(app_state, token))]
pub async fn clear_cart_handler(app_state: web::Data<AppState>, token: SessionToken) -> Result<HttpResponse, AppError> {
  clear_collection(app_state, token, CollectionKind::Cart).await
}

// --- Likes handlers ---

#[instrument(name = "handler::get_likes", skip(app_state, token))]
pub async fn get_likes_handler(app_state: web::Data<AppState>, token: SessionToken) -> Result<HttpResponse, AppError> {
  list_collection(app_state, token, CollectionKind::Likes).await
}

#[instrument(name = "handler::add_to_likes", skip(app_state, token, payload), fields(product_id = payload.product_id))]
pub async fn add_to_likes_handler(
  app_state: web::Data<AppState>,
  token: SessionToken,
  payload: web::Json<AddItemRequestPayload>,
) -> Result<HttpResponse, AppError> {
  add_item(app_state, token, CollectionKind::Likes, payload.product_id).await
}

#[instrument(name = "handler::remove_from_likes", skip(app_state, token, path), fields(local_id = %path.as_ref()))]
pub async fn remove_from_likes_handler(
  app_state: web::Data<AppState>,
  token: SessionToken,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  remove_item(app_state, token, CollectionKind::Likes, path.into_inner()).await
}

#[instrument(name = "handler::clear_likes", skip(app_state, token))]
pub async fn clear_likes_handler(
  app_state: web::Data<AppState>,
  token: SessionToken,
) -> Result<HttpResponse, AppError> {
  clear_collection(app_state, token, CollectionKind::Likes).await
}
