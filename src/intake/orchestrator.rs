//! IntakeOrchestrator — turns one intake submission into a stored plan.

use std::sync::Arc;

use axum::http::Method;
use chrono::Utc;
use tracing::{debug, error, info, warn};

use super::request::{IntakeRequest, ValidatedAssessment};
use crate::config::PlanConfig;
use crate::error::IntakeError;
use crate::ids::IdProvider;
use crate::plan::{Assessment, PersonalizedPlan, classify, generate_plan};
use crate::store::Store;

/// Successful terminal states of an intake request.
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeOutcome {
    /// CORS preflight; answered with an empty 200.
    Preflight,
    /// A plan was built and stored.
    Created(PersonalizedPlan),
}

/// Coordinates validation, classification, templating and persistence.
pub struct IntakeOrchestrator {
    store: Arc<dyn Store>,
    ids: Arc<dyn IdProvider>,
    config: PlanConfig,
}

impl IntakeOrchestrator {
    pub fn new(store: Arc<dyn Store>, ids: Arc<dyn IdProvider>, config: PlanConfig) -> Self {
        Self { store, ids, config }
    }

    pub fn plan_config(&self) -> PlanConfig {
        self.config
    }

    /// Handle a raw intake request.
    ///
    /// OPTIONS is a preflight, POST is processed, anything else is rejected.
    pub async fn handle(&self, method: &Method, body: &[u8]) -> Result<IntakeOutcome, IntakeError> {
        if *method == Method::OPTIONS {
            return Ok(IntakeOutcome::Preflight);
        }
        if *method != Method::POST {
            warn!(%method, "Rejected intake with unsupported method");
            return Err(IntakeError::MethodNotAllowed {
                method: method.to_string(),
            });
        }

        let request = IntakeRequest::from_json(body)?;
        let plan = self.submit(request).await?;
        Ok(IntakeOutcome::Created(plan))
    }

    /// Validate a parsed request, build the plan and store it.
    pub async fn submit(&self, request: IntakeRequest) -> Result<PersonalizedPlan, IntakeError> {
        let validated = request.validate().inspect_err(|e| {
            if let IntakeError::Validation { required, invalid, .. } = e {
                warn!(?required, ?invalid, "Rejected intake with invalid assessment");
            }
        })?;

        let assessment = self.build_assessment(validated);
        let user_id = self.ids.next_id("user");
        let plan = generate_plan(&assessment, &self.config).with_user(user_id);

        debug!(
            plan_id = %plan.id,
            days = plan.daily.len(),
            version = %plan.version,
            "Plan generated"
        );

        if let Err(e) = self.store.save_plan(&plan).await {
            error!(plan_id = %plan.id, error = %e, "Failed to store plan");
            return Err(e.into());
        }

        info!(
            plan_id = %plan.id,
            virtue = %plan.virtue,
            door = %plan.door,
            struggles = plan.assessment.struggles.len(),
            "Plan created"
        );
        Ok(plan)
    }

    fn build_assessment(&self, v: ValidatedAssessment) -> Assessment {
        let primary_virtue = classify(&v.struggles);
        Assessment {
            id: self.ids.next_id("assessment"),
            first_name: v.first_name,
            last_name: v.last_name,
            email: v.email,
            struggles: v.struggles,
            door: v.door,
            time_budget: v.time_budget,
            daypart: v.daypart,
            bible_version: v.bible_version,
            context: v.context,
            primary_virtue,
            created_at: Utc::now(),
        }
    }
}
