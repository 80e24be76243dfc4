// demos/storefront_app/src/state.rs
use crate::config::AppConfig;
use crate::sessions::SessionRegistry;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub db_pool: PgPool,
  pub sessions: Arc<SessionRegistry>,
  pub config: Arc<AppConfig>, // Share loaded config
}
