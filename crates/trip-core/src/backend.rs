//! # Booking Backend Traits
//!
//! The REST backend owns every durable record (users, packages, bookings,
//! payments). The flow talks to it only through these traits so the
//! transport can be swapped: `trip-client` implements them over HTTP and
//! the tests use in-memory doubles.
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────┐
//! │   BookingBackend (trait)     │   │   CatalogBackend (trait)     │
//! │  ├── create_booking()        │   │  ├── list_packages()         │
//! │  ├── create_checkout_session │   │  ├── get_package()           │
//! │  └── confirm_payment()       │   │  ├── my_bookings()           │
//! └──────────────────────────────┘   │  ├── payment_history()       │
//!                ▲                   │  └── update_booking_status() │
//!                │                   └──────────────────────────────┘
//!        ┌───────┴───────┐                          ▲
//!        │  RestClient   │──────────────────────────┘
//!        │ (trip-client) │
//!        └───────────────┘
//! ```

use crate::booking::{
    Booking, BookingRecord, BookingStatus, CheckoutSessionBody, CheckoutSessionRequest,
    ConfirmPaymentRequest, CreateBookingRequest, PaymentRecord,
};
use crate::envelope::Envelope;
use crate::error::BookingResult;
use crate::package::Package;
use async_trait::async_trait;
use std::sync::Arc;

/// The three calls the booking → payment hand-off makes.
#[async_trait]
pub trait BookingBackend: Send + Sync {
    /// Create a booking for a package.
    async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> BookingResult<Envelope<BookingRecord>>;

    /// Mint a hosted payment session for an existing booking.
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> BookingResult<Envelope<CheckoutSessionBody>>;

    /// Ask the backend to verify a completed payment session.
    ///
    /// The payload is opaque: a returned `Ok` is the only success signal.
    async fn confirm_payment(
        &self,
        request: &ConfirmPaymentRequest,
    ) -> BookingResult<serde_json::Value>;
}

/// Read-side and admin calls used by the dashboards.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    async fn list_packages(&self) -> BookingResult<Vec<Package>>;

    async fn get_package(&self, package_id: &str) -> BookingResult<Package>;

    /// Bookings of the authenticated user
    async fn my_bookings(&self) -> BookingResult<Vec<Booking>>;

    /// Payments of the authenticated user
    async fn payment_history(&self) -> BookingResult<Vec<PaymentRecord>>;

    /// Admin: move a booking to another status
    async fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
    ) -> BookingResult<Booking>;
}

/// Type alias for a shared booking backend (dynamic dispatch)
pub type SharedBookingBackend = Arc<dyn BookingBackend>;

/// Type alias for a shared catalog backend
pub type SharedCatalogBackend = Arc<dyn CatalogBackend>;
