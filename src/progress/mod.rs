//! Daily progress tracking — completion records, streaks, milestones and
//! fruit growth.

pub mod model;

pub use model::{Fruit, FruitGrowth, MILESTONES, Milestone, ProgressRecord, ProgressSummary, summarize};

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ProgressError;
use crate::plan::PLAN_DAYS;
use crate::store::Store;

/// Inbound progress update as submitted by a client. Every field is
/// optional so missing ones can be reported together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub plan_id: Option<String>,
    pub day: Option<i64>,
    #[serde(default)]
    pub completed: bool,
}

/// Records and summarizes progress against a store.
pub struct ProgressTracker {
    store: Arc<dyn Store>,
}

impl ProgressTracker {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Validate and persist a progress update.
    pub async fn record(&self, update: ProgressUpdate) -> Result<ProgressRecord, ProgressError> {
        let plan_id = update
            .plan_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let (plan_id, day) = match (plan_id, update.day) {
            (Some(plan_id), Some(day)) => (plan_id, day),
            (plan_id, day) => {
                let mut required = Vec::new();
                if plan_id.is_none() {
                    required.push("planId");
                }
                if day.is_none() {
                    required.push("day");
                }
                warn!(?required, "Rejected progress update with missing fields");
                return Err(ProgressError::Validation {
                    message: format!("Missing required fields: {}", required.join(", ")),
                    required,
                });
            }
        };

        let day = u32::try_from(day)
            .ok()
            .filter(|d| (1..=PLAN_DAYS).contains(d))
            .ok_or(ProgressError::DayOutOfRange {
                day,
                max: PLAN_DAYS,
            })?;

        let record = ProgressRecord {
            plan_id,
            day,
            completed: update.completed,
            timestamp: Utc::now(),
        };
        self.store.record_progress(&record).await?;

        info!(
            plan_id = %record.plan_id,
            day = record.day,
            completed = record.completed,
            "Progress recorded"
        );
        Ok(record)
    }

    /// Summary of all recorded progress for a plan.
    pub async fn summary(&self, plan_id: &str) -> Result<ProgressSummary, ProgressError> {
        let records = self.store.list_progress(plan_id).await?;
        Ok(summarize(plan_id, &records))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::DatabaseError;
    use crate::plan::PersonalizedPlan;
    use crate::store::MemoryStore;

    /// Store that cannot be read or written.
    struct OfflineStore;

    #[async_trait]
    impl Store for OfflineStore {
        fn backend_name(&self) -> &'static str {
            "offline"
        }
        async fn ping(&self) -> Result<(), DatabaseError> {
            Err(DatabaseError::Pool("offline".into()))
        }
        async fn save_plan(&self, _plan: &PersonalizedPlan) -> Result<(), DatabaseError> {
            Err(DatabaseError::Pool("offline".into()))
        }
        async fn get_plan(&self, _id: &str) -> Result<Option<PersonalizedPlan>, DatabaseError> {
            Err(DatabaseError::Pool("offline".into()))
        }
        async fn record_progress(&self, _record: &ProgressRecord) -> Result<(), DatabaseError> {
            Err(DatabaseError::Query("disk full".into()))
        }
        async fn list_progress(&self, _plan_id: &str) -> Result<Vec<ProgressRecord>, DatabaseError> {
            Err(DatabaseError::Query("disk full".into()))
        }
    }

    fn tracker() -> ProgressTracker {
        ProgressTracker::new(Arc::new(MemoryStore::new()))
    }

    fn update(plan_id: Option<&str>, day: Option<i64>, completed: bool) -> ProgressUpdate {
        ProgressUpdate {
            plan_id: plan_id.map(String::from),
            day,
            completed,
        }
    }

    #[tokio::test]
    async fn records_and_summarizes() {
        let tracker = tracker();
        for day in 1..=3 {
            tracker
                .record(update(Some("plan_x"), Some(day), true))
                .await
                .unwrap();
        }
        let summary = tracker.summary("plan_x").await.unwrap();
        assert_eq!(summary.completed_days, 3);
        assert_eq!(summary.current_streak, 3);
        assert_eq!(summary.milestones.len(), 2);
    }

    #[tokio::test]
    async fn missing_fields_are_listed() {
        let tracker = tracker();
        match tracker.record(update(None, None, true)).await {
            Err(ProgressError::Validation { required, .. }) => {
                assert_eq!(required, vec!["planId", "day"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        match tracker.record(update(Some("   "), Some(2), true)).await {
            Err(ProgressError::Validation { required, .. }) => {
                assert_eq!(required, vec!["planId"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn day_must_be_within_plan() {
        let tracker = tracker();
        for day in [0, 22, -3] {
            let err = tracker
                .record(update(Some("plan_x"), Some(day), true))
                .await
                .unwrap_err();
            assert!(matches!(err, ProgressError::DayOutOfRange { .. }), "{err:?}");
        }
    }

    #[tokio::test]
    async fn uncompleting_a_day_overwrites() {
        let tracker = tracker();
        tracker.record(update(Some("plan_x"), Some(5), true)).await.unwrap();
        let record = tracker.record(update(Some("plan_x"), Some(5), false)).await.unwrap();
        assert!(!record.completed);
        assert_eq!(tracker.summary("plan_x").await.unwrap().completed_days, 0);
    }

    #[test]
    fn update_deserializes_camel_case() {
        let update: ProgressUpdate =
            serde_json::from_str(r#"{"planId":"plan_1","day":4,"completed":true}"#).unwrap();
        assert_eq!(update.plan_id.as_deref(), Some("plan_1"));
        assert_eq!(update.day, Some(4));
        assert!(update.completed);

        let bare: ProgressUpdate = serde_json::from_str("{}").unwrap();
        assert!(bare.plan_id.is_none());
        assert!(!bare.completed);
    }

    #[tokio::test]
    async fn store_failures_are_internal_errors() {
        let tracker = ProgressTracker::new(Arc::new(OfflineStore));

        match tracker.record(update(Some("plan_x"), Some(1), true)).await {
            Err(ProgressError::Internal(msg)) => assert!(msg.contains("disk full"), "{msg}"),
            other => panic!("expected internal error, got {other:?}"),
        }
        assert!(matches!(
            tracker.summary("plan_x").await,
            Err(ProgressError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn validation_runs_before_the_store() {
        let tracker = ProgressTracker::new(Arc::new(OfflineStore));
        let err = tracker.record(update(None, Some(1), true)).await.unwrap_err();
        assert!(matches!(err, ProgressError::Validation { .. }), "{err:?}");
    }
}
