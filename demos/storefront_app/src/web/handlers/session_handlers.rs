// demos/storefront_app/src/web/handlers/session_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::{resolve_session, SessionToken};

/// Opens a fresh anonymous browsing session and hands the token back. The
/// client sends it on every subsequent request as `X-Session-Token`.
#[instrument(name = "handler::create_session", skip(app_state))]
pub async fn create_session_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let session = app_state.sessions.create().await;
  info!("Session opened: {}", session.token);

  Ok(HttpResponse::Created().json(json!({
      "message": "Session created.",
      "token": session.token,
  })))
}

#[instrument(name = "handler::get_session", skip(app_state, token))]
pub async fn get_session_handler(
  app_state: web::Data<AppState>,
  token: SessionToken,
) -> Result<HttpResponse, AppError> {
  let session = resolve_session(&app_state, &token)?;
  let snapshot = session.auth.snapshot();

  Ok(HttpResponse::Ok().json(json!({
      "token": session.token,
      "authenticated": snapshot.identity.is_some(),
      "email": snapshot.identity.map(|identity| identity.email),
  })))
}
