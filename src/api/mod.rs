//! HTTP surface — axum router, shared state and error responses.

pub mod responses;
pub mod routes;

pub use routes::{AppState, api_routes};
