// demos/storefront_app/src/models/user.rs

use chrono::{DateTime, Utc};
use loopwear_sync::Identity;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
  pub id: Uuid,
  pub email: String,
  #[serde(skip_serializing)] // Never send password hash to client
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
}

impl User {
  /// The identity handed to the sync layer when this user signs in.
  pub fn identity(&self) -> Identity {
    Identity {
      user_id: self.id,
      email: self.email.clone(),
    }
  }
}
