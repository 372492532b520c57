//! # trip-core
//!
//! Core types, traits and flow logic for the trip-desk booking front end.
//!
//! This crate provides:
//! - `BookingBackend` / `CatalogBackend` traits for the REST backend
//! - `Booking`, `Package` and the request/response bodies of checkout
//! - `Envelope` for the backend's two response shapes
//! - The checkout flow: booking initiator, checkout session requester,
//!   redirect hand-off, and the payment confirmation resolver
//! - `Store` for client-side state driven by pure reducers
//! - `BookingError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use trip_core::{CapturedRedirect, CheckoutFlow, PackageSelection, PaymentResolver};
//!
//! // Package page: book and hand off to the payment provider
//! let mut flow = CheckoutFlow::new();
//! flow.start(&backend, &handoff, &PackageSelection::new("pkg_1", 2)).await;
//!
//! // Return page: verify the payment once
//! let mut resolver = PaymentResolver::mount(&current_url);
//! let state = resolver.resolve(&backend).await;
//! ```

pub mod backend;
pub mod booking;
pub mod envelope;
pub mod error;
pub mod flow;
pub mod handoff;
pub mod initiator;
pub mod package;
pub mod resolver;
pub mod return_path;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use backend::{BookingBackend, CatalogBackend, SharedBookingBackend, SharedCatalogBackend};
pub use booking::{
    clamp_pax, Booking, BookingRecord, BookingStatus, CheckoutSessionBody,
    CheckoutSessionRequest, ConfirmPaymentRequest, CreateBookingRequest, PackageRef,
    PaymentRecord, PaymentStatus, UpdateBookingStatusRequest,
};
pub use envelope::Envelope;
pub use error::{BookingError, BookingResult, GENERIC_FAILURE};
pub use flow::{CheckoutFlow, CheckoutStage, PackageSelection};
pub use handoff::{CapturedRedirect, RedirectHandoff};
pub use initiator::{initiate_booking, BOOKING_FAILED};
pub use package::{Currency, ItineraryDay, Package};
pub use resolver::{PaymentResolver, ResolverState, CONFIRMATION_FAILED, CONFIRMED, HISTORY_CTA};
pub use return_path::{session_id_from_url, ReturnPaths, SESSION_ID_PARAM};
pub use session::{request_checkout_url, CHECKOUT_FAILED};
pub use store::{reduce, Action, ClientState, Store, User};
