//! Data models
//!
//! Shared between the admin client and the backend (via API).
//! Wire records use camelCase field names.

pub mod clock_time;
pub mod settings;
pub mod shift;
pub mod weekday_set;

// Re-exports
pub use clock_time::*;
pub use settings::*;
pub use shift::*;
pub use weekday_set::*;
