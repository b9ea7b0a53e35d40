//! Transports for the admin REST API

mod http;
#[cfg(feature = "in-process")]
mod http_oneshot;

pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
