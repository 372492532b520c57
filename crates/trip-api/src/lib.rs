//! # trip-api
//!
//! HTTP gateway for trip-desk.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Forwarding endpoints for checkout sessions and payment confirmation
//! - A server-side checkout entry point that redirects to the payment provider
//! - Return pages that confirm the payment once
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/checkout-session` | Forward checkout-session creation |
//! | POST | `/api/payment/confirm` | Forward payment confirmation |
//! | POST | `/book` | Book a package, redirect to payment |
//! | GET | `/payment/success` | Confirm payment and show outcome |
//! | GET | `/payment/cancel` | Cancellation page |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
