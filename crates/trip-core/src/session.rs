//! # Checkout Session Requester
//!
//! Second step of checkout: ask the backend to mint a hosted payment page
//! for a booking that already exists.

use crate::backend::BookingBackend;
use crate::booking::CheckoutSessionRequest;
use crate::error::{BookingError, BookingResult};
use tracing::{debug, instrument};

/// Fallback message when a failed session call gives nothing better
pub const CHECKOUT_FAILED: &str = "Failed to start checkout.";

/// Request a checkout session and return the provider URL.
///
/// A response without a usable URL fails the attempt; nothing is retried.
#[instrument(skip(backend))]
pub async fn request_checkout_url(
    backend: &dyn BookingBackend,
    booking_id: &str,
) -> BookingResult<String> {
    let booking_id = booking_id.trim();
    if booking_id.is_empty() {
        return Err(BookingError::Validation(
            "bookingId is required".to_string(),
        ));
    }

    let request = CheckoutSessionRequest {
        booking_id: booking_id.to_string(),
    };

    let envelope = backend.create_checkout_session(&request).await?;
    let wrapped = envelope.is_wrapped();
    let body = envelope.into_inner();

    let url = body
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| BookingError::MissingData("missing checkout URL".to_string()))?;

    debug!(wrapped, session_id = ?body.id, "Checkout session ready");

    Ok(url)
}
