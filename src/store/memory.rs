//! In-memory store used when no database path is configured.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::traits::Store;
use crate::error::DatabaseError;
use crate::plan::PersonalizedPlan;
use crate::progress::ProgressRecord;

/// Plans and progress held in process memory. Lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    plans: RwLock<HashMap<String, PersonalizedPlan>>,
    /// plan id → day → record.
    progress: RwLock<HashMap<String, BTreeMap<u32, ProgressRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn save_plan(&self, plan: &PersonalizedPlan) -> Result<(), DatabaseError> {
        self.plans
            .write()
            .await
            .insert(plan.id.clone(), plan.clone());
        debug!(plan_id = %plan.id, "Plan saved in memory");
        Ok(())
    }

    async fn get_plan(&self, id: &str) -> Result<Option<PersonalizedPlan>, DatabaseError> {
        Ok(self.plans.read().await.get(id).cloned())
    }

    async fn record_progress(&self, record: &ProgressRecord) -> Result<(), DatabaseError> {
        self.progress
            .write()
            .await
            .entry(record.plan_id.clone())
            .or_default()
            .insert(record.day, record.clone());
        Ok(())
    }

    async fn list_progress(&self, plan_id: &str) -> Result<Vec<ProgressRecord>, DatabaseError> {
        Ok(self
            .progress
            .read()
            .await
            .get(plan_id)
            .map(|days| days.values().cloned().collect())
            .unwrap_or_default())
    }
}
