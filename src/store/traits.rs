//! Backend-agnostic `Store` trait — single async interface for plans and
//! progress.

use async_trait::async_trait;

use crate::error::DatabaseError;
use crate::plan::PersonalizedPlan;
use crate::progress::ProgressRecord;

#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name for health reporting.
    fn backend_name(&self) -> &'static str;

    /// Check the backend is reachable.
    async fn ping(&self) -> Result<(), DatabaseError>;

    // ── Plans ───────────────────────────────────────────────────────

    /// Insert or replace a plan.
    async fn save_plan(&self, plan: &PersonalizedPlan) -> Result<(), DatabaseError>;

    /// Get a plan by ID.
    async fn get_plan(&self, id: &str) -> Result<Option<PersonalizedPlan>, DatabaseError>;

    // ── Progress ────────────────────────────────────────────────────

    /// Insert a progress record, overwriting any earlier record for the same
    /// (plan, day).
    async fn record_progress(&self, record: &ProgressRecord) -> Result<(), DatabaseError>;

    /// All progress records for a plan, ordered by day.
    async fn list_progress(&self, plan_id: &str) -> Result<Vec<ProgressRecord>, DatabaseError>;
}
