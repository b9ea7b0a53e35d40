//! Shared types for Mealdesk
//!
//! Data models exchanged over the admin REST API, the ordering eligibility
//! policy, and the unified error types used by the client and the backend.

pub mod eligibility;
pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use eligibility::{BusinessClock, Denial, Eligibility, PolicyError, PolicyResult};
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
