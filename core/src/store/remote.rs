// core/src/store/remote.rs

//! Remote (authenticated-mode) persistence over the relational store.
//!
//! Two tables, `cart_items` and `liked_items`, share one shape: row id,
//! owning-user column, catalog item id, snapshot JSON, quantity, timestamp.
//! Every mutation is scoped by both the row id and the user id, so a row
//! can never be touched across users even if an id leaks. Operations are
//! single-attempt; transport failures are reported to the caller, never
//! retried here.

use crate::collection::{is_local_id, CollectionItem, CollectionKind, ItemId};
use crate::error::{SyncError, SyncResult};
use crate::store::{CollectionStore, ItemPatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::collection::ItemSnapshot;

/// Postgres SQLSTATE for a unique-constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
  matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION))
}

#[derive(Debug, FromRow)]
struct StoredRow {
  id: Uuid,
  item_id: String,
  snapshot: Json<ItemSnapshot>,
  quantity: i32,
  added_at: DateTime<Utc>,
}

impl From<StoredRow> for CollectionItem {
  fn from(row: StoredRow) -> Self {
    CollectionItem {
      local_id: row.id.to_string(),
      item_id: ItemId::from(row.item_id),
      snapshot: row.snapshot.0,
      quantity: row.quantity,
      added_at: row.added_at,
    }
  }
}

/// Adapter over one user's rows in one collection table.
pub struct RemoteStore {
  pool: PgPool,
  user_id: Uuid,
  kind: CollectionKind,
}

impl RemoteStore {
  pub fn new(pool: PgPool, user_id: Uuid, kind: CollectionKind) -> Self {
    RemoteStore { pool, user_id, kind }
  }

  // Table names come from a closed enum, never from input.
  fn table(&self) -> &'static str {
    match self.kind {
      CollectionKind::Cart => "cart_items",
      CollectionKind::Likes => "liked_items",
    }
  }
}

#[async_trait]
impl CollectionStore for RemoteStore {
  #[instrument(name = "remote_store::list", skip(self), fields(table = self.table(), user_id = %self.user_id))]
  async fn list(&self) -> SyncResult<Vec<CollectionItem>> {
    let sql = format!(
      "SELECT id, item_id, snapshot, quantity, added_at FROM {} WHERE user_id = $1 ORDER BY added_at",
      self.table()
    );
    let rows: Vec<StoredRow> = sqlx::query_as(&sql).bind(self.user_id).fetch_all(&self.pool).await?;
    Ok(rows.into_iter().map(CollectionItem::from).collect())
  }

  #[instrument(
    name = "remote_store::insert",
    skip(self, item),
    fields(table = self.table(), user_id = %self.user_id, item_id = %item.item_id)
  )]
  async fn insert(&self, item: &CollectionItem) -> SyncResult<CollectionItem> {
    let sql = format!(
      "INSERT INTO {} (id, user_id, item_id, snapshot, quantity, added_at) \
       VALUES ($1, $2, $3, $4, $5, $6) \
       RETURNING id, item_id, snapshot, quantity, added_at",
      self.table()
    );
    let row: StoredRow = sqlx::query_as(&sql)
      .bind(Uuid::new_v4())
      .bind(self.user_id)
      .bind(item.item_id.as_str())
      .bind(Json(&item.snapshot))
      .bind(item.quantity)
      .bind(item.added_at)
      .fetch_one(&self.pool)
      .await
      .map_err(|err| {
        if is_unique_violation(&err) {
          SyncError::Constraint {
            item_id: item.item_id.to_string(),
          }
        } else {
          SyncError::from(err)
        }
      })?;
    Ok(CollectionItem::from(row))
  }

  #[instrument(name = "remote_store::update", skip(self), fields(table = self.table(), user_id = %self.user_id))]
  async fn update(&self, local_id: &str, patch: ItemPatch) -> SyncResult<()> {
    let Some(quantity) = patch.quantity else {
      return Ok(());
    };
    let row_id = Uuid::parse_str(local_id)
      .map_err(|_| SyncError::Internal(format!("'{local_id}' is not a remote row id")))?;
    let sql = format!(
      "UPDATE {} SET quantity = $1 WHERE id = $2 AND user_id = $3",
      self.table()
    );
    let result = sqlx::query(&sql)
      .bind(quantity)
      .bind(row_id)
      .bind(self.user_id)
      .execute(&self.pool)
      .await?;
    if result.rows_affected() == 0 {
      return Err(SyncError::Internal(format!(
        "no {} row matches id '{local_id}' for this user",
        self.table()
      )));
    }
    Ok(())
  }

  #[instrument(name = "remote_store::remove", skip(self), fields(table = self.table(), user_id = %self.user_id))]
  async fn remove(&self, local_id: &str) -> SyncResult<()> {
    // Rows that still carry a local-generated token were never persisted
    // remotely; removal of such an id is complete without a round trip.
    if is_local_id(local_id) {
      debug!(local_id, "skipping remote delete for local-only row id");
      return Ok(());
    }
    let Ok(row_id) = Uuid::parse_str(local_id) else {
      debug!(local_id, "skipping remote delete for unparseable row id");
      return Ok(());
    };
    let sql = format!("DELETE FROM {} WHERE id = $1 AND user_id = $2", self.table());
    sqlx::query(&sql).bind(row_id).bind(self.user_id).execute(&self.pool).await?;
    Ok(())
  }

  #[instrument(name = "remote_store::clear", skip(self), fields(table = self.table(), user_id = %self.user_id))]
  async fn clear(&self) -> SyncResult<()> {
    let sql = format!("DELETE FROM {} WHERE user_id = $1", self.table());
    sqlx::query(&sql).bind(self.user_id).execute(&self.pool).await?;
    Ok(())
  }
}
