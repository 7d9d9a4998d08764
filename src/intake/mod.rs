//! Intake — validates an assessment submission and turns it into a stored
//! personalized plan.

pub mod orchestrator;
pub mod request;

pub use orchestrator::{IntakeOrchestrator, IntakeOutcome};
pub use request::{AssessmentInput, IntakeRequest, REQUIRED_FIELDS, ValidatedAssessment};
