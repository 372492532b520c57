//! Scripted in-memory backend shared by the flow tests.

use crate::backend::BookingBackend;
use crate::booking::{
    BookingRecord, CheckoutSessionBody, CheckoutSessionRequest, ConfirmPaymentRequest,
    CreateBookingRequest,
};
use crate::envelope::Envelope;
use crate::error::{BookingError, BookingResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;

pub(crate) struct MockBackend {
    pub booking: BookingResult<Envelope<BookingRecord>>,
    pub session: BookingResult<Envelope<CheckoutSessionBody>>,
    pub confirm: BookingResult<serde_json::Value>,
    pub booking_calls: Mutex<Vec<CreateBookingRequest>>,
    pub session_calls: Mutex<Vec<CheckoutSessionRequest>>,
    pub confirm_calls: Mutex<Vec<ConfirmPaymentRequest>>,
}

impl MockBackend {
    /// Backend that creates booking `booking_id` and hands back `url`
    pub fn happy(booking_id: &str, url: &str) -> Self {
        Self {
            booking: Ok(Envelope::Bare(BookingRecord {
                id: Some(booking_id.to_string()),
                ..Default::default()
            })),
            session: Ok(Envelope::Wrapped {
                data: CheckoutSessionBody {
                    url: Some(url.to_string()),
                    id: Some("cs_test_1".to_string()),
                },
            }),
            confirm: Ok(json!({ "success": true })),
            booking_calls: Mutex::new(Vec::new()),
            session_calls: Mutex::new(Vec::new()),
            confirm_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_booking(mut self, response: BookingResult<Envelope<BookingRecord>>) -> Self {
        self.booking = response;
        self
    }

    pub fn with_session(mut self, response: BookingResult<Envelope<CheckoutSessionBody>>) -> Self {
        self.session = response;
        self
    }

    pub fn with_confirm(mut self, response: BookingResult<serde_json::Value>) -> Self {
        self.confirm = response;
        self
    }

    pub fn failing_http(status: u16, message: Option<&str>) -> BookingError {
        BookingError::Http {
            status,
            body_message: message.map(String::from),
        }
    }

    pub fn booking_count(&self) -> usize {
        self.booking_calls.lock().unwrap().len()
    }

    pub fn session_count(&self) -> usize {
        self.session_calls.lock().unwrap().len()
    }

    pub fn confirm_count(&self) -> usize {
        self.confirm_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BookingBackend for MockBackend {
    async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> BookingResult<Envelope<BookingRecord>> {
        self.booking_calls.lock().unwrap().push(request.clone());
        self.booking.clone()
    }

    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> BookingResult<Envelope<CheckoutSessionBody>> {
        self.session_calls.lock().unwrap().push(request.clone());
        self.session.clone()
    }

    async fn confirm_payment(
        &self,
        request: &ConfirmPaymentRequest,
    ) -> BookingResult<serde_json::Value> {
        self.confirm_calls.lock().unwrap().push(request.clone());
        self.confirm.clone()
    }
}
