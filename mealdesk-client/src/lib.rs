//! Mealdesk Client - admin REST API client
//!
//! Typed access to `/api/shifts` and `/api/settings`, dirty-tracking drafts
//! for editing those records, and a local eligibility check built on
//! [`shared::eligibility`].

pub mod admin;
pub mod client;
pub mod config;
pub mod draft;
pub mod error;

pub use admin::AdminClient;
pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use draft::{Draft, SaveSummary, SettingsDraft, ShiftBoard};
pub use error::{ClientError, ClientResult};

// Re-export shared types for convenience
pub use shared::models::{Settings, Shift, ShiftId, ShiftPayload};
pub use shared::{Denial, Eligibility};
