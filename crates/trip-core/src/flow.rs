//! # Checkout Flow
//!
//! Drives booking → checkout session → redirect hand-off as one sequential
//! state machine.
//!
//! ```text
//!  Idle ──► CreatingBooking ──► RequestingSession ──► HandedOff
//!                 │                     │
//!                 └──────────┬──────────┘
//!                            ▼
//!                          Failed
//! ```
//!
//! `HandedOff` and `Failed` are terminal. The hand-off happens at most once
//! and only after both remote calls succeeded.

use crate::backend::BookingBackend;
use crate::handoff::RedirectHandoff;
use crate::initiator::{initiate_booking, BOOKING_FAILED};
use crate::session::{request_checkout_url, CHECKOUT_FAILED};
use serde::Serialize;
use tracing::{error, instrument};

/// Where a checkout attempt stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum CheckoutStage {
    Idle,
    CreatingBooking,
    RequestingSession { booking_id: String },
    HandedOff { booking_id: String, url: String },
    Failed { message: String },
}

impl CheckoutStage {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CheckoutStage::HandedOff { .. } | CheckoutStage::Failed { .. }
        )
    }

    /// Error text for a failed attempt
    pub fn error_message(&self) -> Option<&str> {
        match self {
            CheckoutStage::Failed { message } => Some(message),
            _ => None,
        }
    }
}

impl Default for CheckoutStage {
    fn default() -> Self {
        CheckoutStage::Idle
    }
}

/// What the user picked on the package page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSelection {
    pub package_id: String,
    /// Raw participant count from the form; clamped by the initiator
    pub pax: i64,
    /// Seats the package advertises, when known
    pub available_seats: Option<u32>,
}

impl PackageSelection {
    pub fn new(package_id: impl Into<String>, pax: i64) -> Self {
        Self {
            package_id: package_id.into(),
            pax,
            available_seats: None,
        }
    }

    pub fn with_available_seats(mut self, seats: u32) -> Self {
        self.available_seats = Some(seats);
        self
    }
}

/// One checkout attempt
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    stage: CheckoutStage,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &CheckoutStage {
        &self.stage
    }

    /// Run the attempt to completion.
    ///
    /// Every failure lands in `Failed` with a user-facing message and the
    /// hand-off is left untouched. Calling this on a terminal flow does
    /// nothing.
    #[instrument(skip(self, backend, handoff), fields(package_id = %selection.package_id))]
    pub async fn start(
        &mut self,
        backend: &dyn BookingBackend,
        handoff: &dyn RedirectHandoff,
        selection: &PackageSelection,
    ) -> &CheckoutStage {
        if self.stage.is_terminal() {
            return &self.stage;
        }

        self.stage = CheckoutStage::CreatingBooking;
        let booking_id = match initiate_booking(
            backend,
            &selection.package_id,
            selection.pax,
            selection.available_seats,
        )
        .await
        {
            Ok(id) => id,
            Err(e) => {
                error!("Booking failed: {}", e);
                self.stage = CheckoutStage::Failed {
                    message: e.user_message(BOOKING_FAILED),
                };
                return &self.stage;
            }
        };

        self.stage = CheckoutStage::RequestingSession {
            booking_id: booking_id.clone(),
        };
        let url = match request_checkout_url(backend, &booking_id).await {
            Ok(url) => url,
            Err(e) => {
                error!(booking_id = %booking_id, "Checkout session failed: {}", e);
                self.stage = CheckoutStage::Failed {
                    message: e.user_message(CHECKOUT_FAILED),
                };
                return &self.stage;
            }
        };

        handoff.redirect(&url);
        self.stage = CheckoutStage::HandedOff { booking_id, url };
        &self.stage
    }
}
