//! Plan derivation — struggle classification and 21-day templating.
//!
//! An intake assessment flows through two pure steps: the classifier picks
//! the primary virtue from the struggle tags, and the templater expands
//! (virtue, door, time budget) into 21 daily practices plus plan metadata.

pub mod classifier;
pub mod model;
pub mod quotes;
pub mod templater;

pub use classifier::classify;
pub use model::{
    Assessment, DailyPractice, Daypart, Door, PLAN_DAYS, PersonalizedPlan, Quote, QuoteType,
    Virtue,
};
pub use templater::generate_plan;
