// demos/storefront_app/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize; // For request payloads
use serde_json::json; // For JSON responses
use tracing::{info, instrument, warn};

use crate::errors::AppError; // Your application specific error
use crate::models::User;
use crate::services::auth_service;
use crate::state::AppState;
use crate::web::handlers::{resolve_session, SessionToken};

/// Postgres SQLSTATE for a unique-constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

fn is_unique_violation(err: &sqlx::Error) -> bool {
  matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION))
}

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct SignupRequestPayload {
  pub email: String,
  pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct SigninRequestPayload {
  pub email: String,
  pub password: String,
}

// --- Handler Implementations ---

#[instrument(
    name = "handler::signup",
    skip(app_state, token, req_payload),
    fields(req_email = %req_payload.email)
)]
pub async fn signup_handler(
  app_state: web::Data<AppState>,
  token: SessionToken,
  req_payload: web::Json<SignupRequestPayload>,
) -> Result<HttpResponse, AppError> {
  info!("Signup attempt for email: {}", req_payload.email);
  let session = resolve_session(&app_state, &token)?;

  let email = req_payload.email.trim().to_lowercase();
  if email.is_empty() || !email.contains('@') {
    return Err(AppError::Validation("A valid email address is required.".to_string()));
  }
  if req_payload.password.len() < 8 {
    return Err(AppError::Validation(
      "Password must be at least 8 characters long.".to_string(),
    ));
  }

  let password_hash = auth_service::hash_password(&req_payload.password)?;

  let user: User = sqlx::query_as(
    "INSERT INTO users (id, email, password_hash, created_at) VALUES ($1, $2, $3, NOW()) \
     RETURNING id, email, password_hash, created_at",
  )
  .bind(uuid::Uuid::new_v4())
  .bind(&email)
  .bind(&password_hash)
  .fetch_one(&app_state.db_pool)
  .await
  .map_err(|err| {
    if is_unique_violation(&err) {
      AppError::Validation(format!("An account already exists for '{}'.", email))
    } else {
      AppError::Sqlx(err)
    }
  })?;

  info!("Signup successful for email: {}. User ID: {}", email, user.id);

  // A fresh account signs the session in immediately; both collections
  // transition to the (empty) remote backend.
  session.sign_in(user.identity()).await;

  Ok(HttpResponse::Created().json(json!({
      "message": "User created successfully.",
      "userId": user.id.to_string(),
      "email": user.email,
  })))
}

#[instrument(
    name = "handler::signin",
    skip(app_state, token, req_payload),
    fields(req_email = %req_payload.email)
)]
pub async fn signin_handler(
  app_state: web::Data<AppState>,
  token: SessionToken,
  req_payload: web::Json<SigninRequestPayload>,
) -> Result<HttpResponse, AppError> {
  info!("Signin attempt for email: {}", req_payload.email);
  let session = resolve_session(&app_state, &token)?;

  let email = req_payload.email.trim().to_lowercase();
  let user_opt: Option<User> =
    sqlx::query_as("SELECT id, email, password_hash, created_at FROM users WHERE email = $1")
      .bind(&email)
      .fetch_optional(&app_state.db_pool)
      .await?;

  // One rejection message for both unknown email and bad password, so the
  // endpoint does not confirm which addresses have accounts.
  let Some(user) = user_opt else {
    warn!("Signin failed: no account for email {}", email);
    return Err(AppError::Auth("Invalid email or password.".to_string()));
  };
  if !auth_service::verify_password(&user.password_hash, &req_payload.password)? {
    warn!("Signin failed: password mismatch for email {}", email);
    return Err(AppError::Auth("Invalid email or password.".to_string()));
  }

  info!("Signin successful for email: {}. User ID: {}", email, user.id);
  session.sign_in(user.identity()).await;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Signin successful.",
      "userId": user.id.to_string(),
      "email": user.email,
  })))
}

#[instrument(name = "handler::signout", skip(app_state, token))]
pub async fn signout_handler(
  app_state: web::Data<AppState>,
  token: SessionToken,
) -> Result<HttpResponse, AppError> {
  let session = resolve_session(&app_state, &token)?;

  if session.auth.identity().is_none() {
    return Err(AppError::Auth("Session is not signed in.".to_string()));
  }

  session.sign_out().await;
  info!("Signout complete for session {}", session.token);

  Ok(HttpResponse::Ok().json(json!({
      "message": "Signed out.",
  })))
}
