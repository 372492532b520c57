//! # Booking Initiator
//!
//! First step of checkout: turn a package selection into a booking record
//! on the backend and hand back its identifier.

use crate::backend::BookingBackend;
use crate::booking::{clamp_pax, exceeds_available, CreateBookingRequest};
use crate::error::{BookingError, BookingResult};
use tracing::{info, instrument, warn};

/// Fallback message when a failed booking call gives nothing better
pub const BOOKING_FAILED: &str = "Failed to create booking.";

/// Create a booking for `package_id` and return its identifier.
///
/// `requested_pax` is clamped to at least 1. `available_seats` is advisory:
/// exceeding it is logged and the request still goes out.
#[instrument(skip(backend))]
pub async fn initiate_booking(
    backend: &dyn BookingBackend,
    package_id: &str,
    requested_pax: i64,
    available_seats: Option<u32>,
) -> BookingResult<String> {
    let package_id = package_id.trim();
    if package_id.is_empty() {
        return Err(BookingError::Validation("package is required".to_string()));
    }

    let pax = clamp_pax(requested_pax);
    if exceeds_available(pax, available_seats) {
        warn!(
            pax,
            available_seats = ?available_seats,
            "Requested participants exceed advertised seats"
        );
    }

    let request = CreateBookingRequest {
        package: package_id.to_string(),
        pax,
    };

    let record = backend.create_booking(&request).await?.into_inner();

    let booking_id = record
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| BookingError::MissingData("missing booking identifier".to_string()))?;

    info!(booking_id = %booking_id, pax, "Booking created");

    Ok(booking_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingRecord;
    use crate::envelope::Envelope;
    use crate::testing::MockBackend;

    #[tokio::test]
    async fn test_returns_identifier_from_bare_body() {
        let backend = MockBackend::happy("b1", "https://pay.example/s1");

        let id = initiate_booking(&backend, "pkg_1", 2, Some(10)).await.unwrap();

        assert_eq!(id, "b1");
        assert_eq!(backend.booking_count(), 1);
    }

    #[tokio::test]
    async fn test_returns_identifier_from_wrapped_body() {
        let backend = MockBackend::happy("unused", "https://pay.example/s1").with_booking(Ok(
            Envelope::Wrapped {
                data: BookingRecord {
                    id: Some("b7".into()),
                    ..Default::default()
                },
            },
        ));

        let id = initiate_booking(&backend, "pkg_1", 1, None).await.unwrap();
        assert_eq!(id, "b7");
    }

    #[tokio::test]
    async fn test_zero_pax_is_clamped_to_one() {
        let backend = MockBackend::happy("b1", "https://pay.example/s1");

        initiate_booking(&backend, "pkg_1", 0, None).await.unwrap();

        let sent = backend.booking_calls.lock().unwrap()[0].clone();
        assert_eq!(sent.pax, 1);
        assert_eq!(
            serde_json::to_value(&sent).unwrap(),
            serde_json::json!({ "package": "pkg_1", "pax": 1 })
        );
    }

    #[tokio::test]
    async fn test_seat_bound_is_advisory() {
        let backend = MockBackend::happy("b1", "https://pay.example/s1");

        initiate_booking(&backend, "pkg_1", 9, Some(4)).await.unwrap();

        assert_eq!(backend.booking_calls.lock().unwrap()[0].pax, 9);
    }

    #[tokio::test]
    async fn test_missing_package_never_calls_backend() {
        let backend = MockBackend::happy("b1", "https://pay.example/s1");

        let err = initiate_booking(&backend, "  ", 2, None).await.unwrap_err();

        assert!(matches!(err, BookingError::Validation(_)));
        assert_eq!(backend.booking_count(), 0);
    }

    #[tokio::test]
    async fn test_identifier_xor_message() {
        let cases = vec![
            Ok(Envelope::Bare(BookingRecord {
                id: Some("b1".into()),
                ..Default::default()
            })),
            Ok(Envelope::Bare(BookingRecord::default())),
            Ok(Envelope::Wrapped {
                data: BookingRecord {
                    id: Some(String::new()),
                    ..Default::default()
                },
            }),
            Err(MockBackend::failing_http(400, Some("Package is fully booked"))),
            Err(MockBackend::failing_http(500, None)),
            Err(BookingError::Network(String::new())),
        ];

        for response in cases {
            let backend = MockBackend::happy("x", "https://pay.example/s1").with_booking(response);
            match initiate_booking(&backend, "pkg_1", 1, None).await {
                Ok(id) => assert!(!id.is_empty()),
                Err(err) => assert!(!err.user_message(BOOKING_FAILED).is_empty()),
            }
        }
    }

    #[tokio::test]
    async fn test_body_message_surfaces() {
        let backend = MockBackend::happy("x", "https://pay.example/s1").with_booking(Err(
            MockBackend::failing_http(400, Some("Package is fully booked")),
        ));

        let err = initiate_booking(&backend, "pkg_1", 1, None).await.unwrap_err();
        assert_eq!(err.user_message(BOOKING_FAILED), "Package is fully booked");
    }
}
