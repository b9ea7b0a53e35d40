//! Mealdesk Mock - in-memory admin backend
//!
//! Serves `/api/shifts` and `/api/settings` from memory for local runs and
//! integration tests.

pub mod api;
pub mod config;
pub mod logger;
pub mod state;

pub use api::build_app;
pub use config::Config;
pub use state::AppState;
