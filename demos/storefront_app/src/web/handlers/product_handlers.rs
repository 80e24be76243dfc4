// demos/storefront_app/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{error, info, instrument, warn};

use crate::catalog::ProductFilter;
use crate::errors::AppError;
use crate::models::Product;
use crate::state::AppState;

#[instrument(name = "handler::list_products", skip(app_state, filter))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  filter: web::Query<ProductFilter>,
) -> Result<HttpResponse, AppError> {
  info!("Attempting to list products (using runtime queries).");

  let products: Vec<Product> = sqlx::query_as(
    "SELECT id, title, brand, description, price_cents, size, condition, sex, category, image_url, sold, created_at \
     FROM products WHERE sold = FALSE ORDER BY created_at DESC",
  )
  .fetch_all(&app_state.db_pool)
  .await
  .map_err(|e| {
    error!("Failed to fetch products from database: {}", e);
    AppError::Sqlx(e)
  })?;

  let products = filter.apply(products);
  info!("Successfully fetched {} products after filtering.", products.len());

  Ok(HttpResponse::Ok().json(json!({
      "message": "Products fetched successfully.",
      "products": products
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product_id_to_fetch = path.into_inner();

  info!(
    "Attempting to fetch product with ID: {} (using runtime queries).",
    product_id_to_fetch
  );

  let product_opt: Option<Product> = sqlx::query_as(
    "SELECT id, title, brand, description, price_cents, size, condition, sex, category, image_url, sold, created_at \
     FROM products WHERE id = $1",
  )
  .bind(product_id_to_fetch)
  .fetch_optional(&app_state.db_pool)
  .await
  .map_err(|e| {
    error!("Database error while fetching product {}: {}", product_id_to_fetch, e);
    AppError::Sqlx(e)
  })?;

  match product_opt {
    Some(product) => {
      info!("Product {} fetched successfully.", product_id_to_fetch);
      Ok(HttpResponse::Ok().json(json!({
          "message": "Product fetched successfully.",
          "product": product
      })))
    }
    None => {
      warn!("Product with ID {} not found.", product_id_to_fetch);
      Err(AppError::NotFound(format!(
        "Product with ID {} not found.",
        product_id_to_fetch
      )))
    }
  }
}
