//! # Payment Confirmation Resolver
//!
//! Runs when the browser comes back from the payment provider. It reads the
//! `session_id` off the return URL, asks the backend to verify it once, and
//! settles on a terminal state the page can render.
//!
//! ```text
//!            session_id missing
//!  Pending ─────────────────────────► Error
//!     │   confirm_payment() failed       ▲
//!     ├──────────────────────────────────┘
//!     │   confirm_payment() ok
//!     └─────────────────────────────────► Success
//! ```
//!
//! Nothing is cached locally: listings only show the new status after
//! they are fetched again.

use crate::backend::BookingBackend;
use crate::booking::ConfirmPaymentRequest;
use crate::error::BookingError;
use crate::return_path::session_id_from_url;
use serde::Serialize;
use tracing::{error, info, instrument};

/// Shown once the backend accepted the payment
pub const CONFIRMED: &str = "Payment confirmed! Your booking has been updated.";

/// Fallback message when a failed confirmation gives nothing better
pub const CONFIRMATION_FAILED: &str = "Payment confirmation failed.";

/// Label of the call-to-action shown on terminal states
pub const HISTORY_CTA: &str = "My Payment History";

/// Resolver state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResolverState {
    Pending,
    Success { message: String },
    Error { message: String },
}

impl ResolverState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ResolverState::Pending)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ResolverState::Pending => None,
            ResolverState::Success { message } | ResolverState::Error { message } => {
                Some(message)
            }
        }
    }
}

/// One mount of the return page
#[derive(Debug)]
pub struct PaymentResolver {
    session_id: Option<String>,
    state: ResolverState,
    attempted: bool,
}

impl PaymentResolver {
    /// Mount on the return URL. A missing `session_id` is terminal right away.
    pub fn mount(return_url: &str) -> Self {
        Self::with_session_id(session_id_from_url(return_url))
    }

    /// Mount with an already extracted session id
    pub fn with_session_id(session_id: Option<String>) -> Self {
        let session_id = session_id.filter(|id| !id.trim().is_empty());
        let state = match session_id {
            Some(_) => ResolverState::Pending,
            None => ResolverState::Error {
                message: BookingError::MissingSessionId.to_string(),
            },
        };

        Self {
            session_id,
            state,
            attempted: false,
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn state(&self) -> &ResolverState {
        &self.state
    }

    /// Verify the payment.
    ///
    /// The backend is called at most once per mount; later calls return the
    /// recorded state. There is no retry, timeout or polling.
    #[instrument(skip(self, backend), fields(session_id = ?self.session_id))]
    pub async fn resolve(&mut self, backend: &dyn BookingBackend) -> &ResolverState {
        if self.attempted || self.state.is_terminal() {
            return &self.state;
        }
        let Some(session_id) = self.session_id.clone() else {
            return &self.state;
        };
        self.attempted = true;

        let request = ConfirmPaymentRequest { session_id };
        self.state = match backend.confirm_payment(&request).await {
            Ok(_) => {
                info!("Payment confirmed");
                ResolverState::Success {
                    message: CONFIRMED.to_string(),
                }
            }
            Err(e) => {
                error!("Payment confirmation failed: {}", e);
                ResolverState::Error {
                    message: e.user_message(CONFIRMATION_FAILED),
                }
            }
        };

        &self.state
    }
}
