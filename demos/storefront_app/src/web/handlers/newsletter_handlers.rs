// demos/storefront_app/src/web/handlers/newsletter_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

/// Postgres SQLSTATE for a unique-constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

// --- Request DTO ---
#[derive(Deserialize, Debug)]
pub struct SubscribeRequestPayload {
  pub email: String,
}

#[instrument(name = "handler::newsletter_subscribe", skip(app_state, payload), fields(req_email = %payload.email))]
pub async fn subscribe_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<SubscribeRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let email = payload.email.trim().to_lowercase();
  if email.is_empty() || !email.contains('@') {
    return Err(AppError::Validation("A valid email address is required.".to_string()));
  }

  let result = sqlx::query("INSERT INTO newsletter_subscribers (id, email, subscribed_at) VALUES ($1, $2, NOW())")
    .bind(uuid::Uuid::new_v4())
    .bind(&email)
    .execute(&app_state.db_pool)
    .await;

  match result {
    Ok(_) => {
      info!("Newsletter subscription recorded for {}", email);
      Ok(HttpResponse::Created().json(json!({
          "message": "Subscribed. Welcome to the Loopwear letter.",
      })))
    }
    // A repeat subscription is not an error worth surfacing; the outcome
    // the caller wanted already holds.
    Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
      info!("Newsletter subscription already present for {}", email);
      Ok(HttpResponse::Ok().json(json!({
          "message": "You're already subscribed.",
      })))
    }
    Err(err) => Err(AppError::Sqlx(err)),
  }
}
