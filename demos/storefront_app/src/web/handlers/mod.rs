// demos/storefront_app/src/web/handlers/mod.rs

// Declare handler modules
pub mod auth_handlers;
pub mod checkout_handlers;
pub mod collection_handlers;
pub mod newsletter_handlers;
pub mod product_handlers;
pub mod session_handlers;

use crate::errors::AppError;
use crate::sessions::Session;
use crate::state::AppState;
use actix_web::{FromRequest, HttpRequest};
use loopwear_sync::Feedback;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

/// Extractor for the session token carried on every storefront request.
/// The session itself is resolved in the handler (resolution needs the
/// registry out of `AppState`, which extractors do not receive here).
#[derive(Debug)]
pub struct SessionToken(pub String);

impl FromRequest for SessionToken {
  type Error = AppError; // Use your app's error type
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    if let Some(header) = req.headers().get("X-Session-Token") {
      if let Ok(token) = header.to_str() {
        if !token.is_empty() {
          return futures_util::future::ready(Ok(SessionToken(token.to_string())));
        }
      }
    }
    warn!("SessionToken extractor: Missing or invalid X-Session-Token header.");
    futures_util::future::ready(Err(AppError::Auth(
      "Session required. Missing or invalid X-Session-Token header.".to_string(),
    )))
  }
}

/// Looks up the live session for a token, or rejects the request.
pub fn resolve_session(app_state: &AppState, token: &SessionToken) -> Result<Arc<Session>, AppError> {
  app_state
    .sessions
    .get(&token.0)
    .ok_or_else(|| AppError::Auth(format!("Unknown session token '{}'.", token.0)))
}

/// Renders controller feedback for the response body.
pub fn feedback_json(notices: &[Feedback]) -> Vec<Value> {
  notices
    .iter()
    .map(|notice| {
      json!({
        "severity": match notice.severity {
          loopwear_sync::Severity::Neutral => "neutral",
          loopwear_sync::Severity::Destructive => "destructive",
        },
        "title": notice.title,
        "description": notice.description,
      })
    })
    .collect()
}
