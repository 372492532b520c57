//! # trip-client
//!
//! HTTP client for the trip-desk booking backend.
//!
//! [`RestClient`] implements both backend traits from `trip-core`, so the
//! checkout flow and the payment resolver can run against the real API:
//!
//! ```rust,ignore
//! use trip_client::RestClient;
//! use trip_core::{CapturedRedirect, CheckoutFlow, PackageSelection};
//!
//! let backend = RestClient::from_env()?.with_bearer_token(token);
//! let handoff = CapturedRedirect::new();
//!
//! let mut flow = CheckoutFlow::new();
//! flow.start(&backend, &handoff, &PackageSelection::new("pkg_1", 2)).await;
//! ```

pub mod config;
pub mod rest;

// Re-exports
pub use config::ApiConfig;
pub use rest::{paths, RestClient};
