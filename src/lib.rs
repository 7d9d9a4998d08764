//! Keel Stone Pathfinder — personalized 21-day virtue practice plans.

pub mod api;
pub mod config;
pub mod error;
pub mod ids;
pub mod intake;
pub mod plan;
pub mod progress;
pub mod store;
