//! libSQL backend — async `Store` implementation.
//!
//! Supports local file and in-memory databases. Plans are stored as a JSON
//! payload with a few indexed columns alongside; progress is upserted on
//! `(plan_id, day)`.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};

use super::migrations;
use super::traits::Store;
use crate::error::DatabaseError;
use crate::plan::PersonalizedPlan;
use crate::progress::ProgressRecord;

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
pub struct LibSqlStore {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlStore {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let store = Self::from_database(db).await?;
        info!(path = %path.display(), "Database opened");
        Ok(store)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;
        Self::from_database(db).await
    }

    async fn from_database(db: LibSqlDatabase) -> Result<Self, DatabaseError> {
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;
        migrations::run_migrations(&conn).await?;
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ── Helper functions ────────────────────────────────────────────────

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return ndt.and_utc();
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

/// Map a progress row. Column order: 0:plan_id, 1:day, 2:completed, 3:recorded_at
fn row_to_progress(row: &libsql::Row) -> Result<ProgressRecord, libsql::Error> {
    let plan_id: String = row.get(0)?;
    let day: i64 = row.get(1)?;
    let completed: i64 = row.get(2)?;
    let recorded_at: String = row.get(3)?;

    Ok(ProgressRecord {
        plan_id,
        day: u32::try_from(day).unwrap_or(0),
        completed: completed != 0,
        timestamp: parse_datetime(&recorded_at),
    })
}

#[async_trait]
impl Store for LibSqlStore {
    fn backend_name(&self) -> &'static str {
        "libsql"
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT 1", ())
            .await
            .map_err(|e| DatabaseError::Query(format!("ping: {e}")))?;
        rows.next()
            .await
            .map_err(|e| DatabaseError::Query(format!("ping: {e}")))?;
        Ok(())
    }

    // ── Plans ───────────────────────────────────────────────────────

    async fn save_plan(&self, plan: &PersonalizedPlan) -> Result<(), DatabaseError> {
        let payload = serde_json::to_string(plan)
            .map_err(|e| DatabaseError::Serialization(format!("save_plan: {e}")))?;

        self.conn()
            .execute(
                "INSERT OR REPLACE INTO plans (id, user_id, virtue, door, version, payload, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    plan.id.clone(),
                    plan.user_id.clone(),
                    plan.virtue.as_str(),
                    plan.door.as_str(),
                    plan.version.clone(),
                    payload,
                    plan.created_at.to_rfc3339(),
                ],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("save_plan: {e}")))?;

        debug!(plan_id = %plan.id, "Plan saved to DB");
        Ok(())
    }

    async fn get_plan(&self, id: &str) -> Result<Option<PersonalizedPlan>, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT payload FROM plans WHERE id = ?1", params![id])
            .await
            .map_err(|e| DatabaseError::Query(format!("get_plan: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let payload: String = row
                    .get(0)
                    .map_err(|e| DatabaseError::Query(format!("get_plan row parse: {e}")))?;
                let plan = serde_json::from_str(&payload)
                    .map_err(|e| DatabaseError::Serialization(format!("get_plan: {e}")))?;
                Ok(Some(plan))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(DatabaseError::Query(format!("get_plan: {e}"))),
        }
    }

    // ── Progress ────────────────────────────────────────────────────

    async fn record_progress(&self, record: &ProgressRecord) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO progress (plan_id, day, completed, recorded_at) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(plan_id, day) DO UPDATE SET completed = excluded.completed, recorded_at = excluded.recorded_at",
                params![
                    record.plan_id.clone(),
                    i64::from(record.day),
                    i64::from(record.completed),
                    record.timestamp.to_rfc3339(),
                ],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("record_progress: {e}")))?;

        debug!(plan_id = %record.plan_id, day = record.day, completed = record.completed, "Progress recorded in DB");
        Ok(())
    }

    async fn list_progress(&self, plan_id: &str) -> Result<Vec<ProgressRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT plan_id, day, completed, recorded_at FROM progress WHERE plan_id = ?1 ORDER BY day",
                params![plan_id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("list_progress: {e}")))?;

        let mut records = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(format!("list_progress: {e}")))?
        {
            records.push(
                row_to_progress(&row)
                    .map_err(|e| DatabaseError::Query(format!("list_progress row parse: {e}")))?,
            );
        }
        Ok(records)
    }
}
