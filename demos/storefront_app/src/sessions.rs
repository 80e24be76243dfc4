// demos/storefront_app/src/sessions.rs

//! Per-session wiring of the collection sync layer.
//!
//! Every browsing session (guest or signed-in) owns one auth provider, one
//! cart controller and one likes controller. Guest persistence lands in a
//! per-token directory under the configured guest store root; signing in
//! swaps both controllers to the caller's rows in the relational store.

use crate::config::AppConfig;
use loopwear_sync::{
  AuthStateProvider, BackendSelector, CollectionController, CollectionKind, Feedback, FeedbackSink,
  FileStorage, Identity,
};
use parking_lot::{Mutex as SyncMutex, RwLock};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Collects the feedback a controller emits during one request so the
/// handler can return it to the client alongside the result.
#[derive(Debug, Default)]
pub struct SessionFeedback {
  notices: SyncMutex<Vec<Feedback>>,
}

impl SessionFeedback {
  pub fn drain(&self) -> Vec<Feedback> {
    std::mem::take(&mut *self.notices.lock())
  }
}

impl FeedbackSink for SessionFeedback {
  fn notify(&self, feedback: Feedback) {
    self.notices.lock().push(feedback);
  }
}

/// One browsing session. Controllers sit behind async mutexes so two
/// concurrent requests on the same token cannot interleave mutations.
pub struct Session {
  pub token: String,
  pub auth: AuthStateProvider,
  pub feedback: Arc<SessionFeedback>,
  pub cart: Mutex<CollectionController>,
  pub likes: Mutex<CollectionController>,
}

impl Session {
  /// Applies a sign-in to this session: records the identity and points
  /// both controllers at the caller's remote rows.
  #[instrument(name = "session::sign_in", skip(self, identity), fields(token = %self.token, user_id = %identity.user_id))]
  pub async fn sign_in(&self, identity: Identity) {
    self.auth.resolve(Some(identity.clone()));
    self.cart.lock().await.handle_auth_transition(Some(&identity)).await;
    self.likes.lock().await.handle_auth_transition(Some(&identity)).await;
    info!("session transitioned to authenticated backend");
  }

  /// Applies a sign-out: both controllers return to the guest backend and
  /// whatever local rows it still holds.
  #[instrument(name = "session::sign_out", skip(self), fields(token = %self.token))]
  pub async fn sign_out(&self) {
    self.auth.resolve(None);
    self.cart.lock().await.handle_auth_transition(None).await;
    self.likes.lock().await.handle_auth_transition(None).await;
    info!("session transitioned to anonymous backend");
  }
}

/// Owns every live session, keyed by token.
pub struct SessionRegistry {
  pool: PgPool,
  config: Arc<AppConfig>,
  sessions: RwLock<HashMap<String, Arc<Session>>>,
}

impl SessionRegistry {
  pub fn new(pool: PgPool, config: Arc<AppConfig>) -> Self {
    SessionRegistry {
      pool,
      config,
      sessions: RwLock::new(HashMap::new()),
    }
  }

  /// Creates a fresh anonymous session with both controllers initialized
  /// against the guest backend.
  #[instrument(name = "sessions::create", skip(self))]
  pub async fn create(&self) -> Arc<Session> {
    let token = Uuid::new_v4().to_string();
    let port = Arc::new(FileStorage::new(self.config.guest_store_dir.join(&token)));
    let selector = Arc::new(BackendSelector::new(port, self.pool.clone()));
    let feedback = Arc::new(SessionFeedback::default());

    let mut cart = CollectionController::new(
      CollectionKind::Cart,
      selector.clone(),
      feedback.clone() as Arc<dyn FeedbackSink>,
    );
    let mut likes = CollectionController::new(
      CollectionKind::Likes,
      selector,
      feedback.clone() as Arc<dyn FeedbackSink>,
    );
    cart.initialize(None).await;
    likes.initialize(None).await;

    let session = Arc::new(Session {
      token: token.clone(),
      auth: AuthStateProvider::new(),
      feedback,
      cart: Mutex::new(cart),
      likes: Mutex::new(likes),
    });
    // A session created by this endpoint has already settled its initial
    // auth check: it is anonymous.
    session.auth.resolve(None);

    self.sessions.write().insert(token.clone(), session.clone());
    info!(token = %token, "session created");
    session
  }

  pub fn get(&self, token: &str) -> Option<Arc<Session>> {
    self.sessions.read().get(token).cloned()
  }

  pub fn remove(&self, token: &str) {
    if self.sessions.write().remove(token).is_some() {
      debug!(token, "session removed");
    }
  }

  pub fn len(&self) -> usize {
    self.sessions.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.sessions.read().is_empty()
  }
}
