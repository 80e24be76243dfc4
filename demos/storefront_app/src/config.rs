// demos/storefront_app/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)] // Clone is useful if parts of config are passed around
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub app_base_url: String,

  /// Root directory for per-guest-session file storage.
  pub guest_store_dir: PathBuf,

  // Mock email config
  pub mock_email_sender: String,
  /// Inbox the order notifications are addressed to (the seller).
  pub order_inbox: String,

  // Optional: for seeding DB on startup
  pub seed_db: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;
    let app_base_url = get_env("APP_BASE_URL").unwrap_or_else(|_| format!("http://{}:{}", server_host, server_port));

    let guest_store_dir = get_env("GUEST_STORE_DIR")
      .map(PathBuf::from)
      .unwrap_or_else(|_| env::temp_dir().join("loopwear-guest-sessions"));

    let mock_email_sender = get_env("MOCK_EMAIL_SENDER").unwrap_or_else(|_| "noreply@loopwear.example".to_string());
    let order_inbox = get_env("ORDER_INBOX").unwrap_or_else(|_| "orders@loopwear.example".to_string());

    let seed_db = get_env("SEED_DB")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      app_base_url,
      guest_store_dir,
      mock_email_sender,
      order_inbox,
      seed_db,
    })
  }
}
