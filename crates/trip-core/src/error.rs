//! # Booking Error Types
//!
//! Typed error handling for the trip-desk booking and payment flow.
//! Every remote operation returns `Result<T, BookingError>`; the flow
//! components turn errors into a user-facing string with
//! [`BookingError::user_message`] and never propagate them further.

use thiserror::Error;

/// Shown when neither the response body nor the transport supplied any text.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Core error type for all booking and payment operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// A required field was missing before the call was made
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Transport failure talking to the REST backend
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-2xx status
    #[error("Request failed with status code {status}")]
    Http {
        status: u16,
        body_message: Option<String>,
    },

    /// Successful response missing a required field
    #[error("Unexpected response: {0}")]
    MissingData(String),

    /// Return path reached without a `session_id` query parameter
    #[error("Missing session identifier in URL.")]
    MissingSessionId,

    /// Configuration errors (bad base URL, unusable client settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BookingError {
    /// Message to show the user.
    ///
    /// Preference order: the response body's `message`, then the error's own
    /// text, then `fallback`. The result is never empty.
    pub fn user_message(&self, fallback: &str) -> String {
        if let BookingError::Http {
            body_message: Some(message),
            ..
        } = self
        {
            if !message.trim().is_empty() {
                return message.clone();
            }
        }

        let own = match self {
            BookingError::Validation(m)
            | BookingError::Network(m)
            | BookingError::MissingData(m)
            | BookingError::Configuration(m)
            | BookingError::Serialization(m) => {
                if m.trim().is_empty() {
                    String::new()
                } else {
                    self.to_string()
                }
            }
            BookingError::Http { .. } | BookingError::MissingSessionId => self.to_string(),
        };

        if !own.is_empty() {
            own
        } else if !fallback.trim().is_empty() {
            fallback.to_string()
        } else {
            GENERIC_FAILURE.to_string()
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            BookingError::Validation(_) => 400,
            BookingError::Network(_) => 503,
            BookingError::Http { status, .. } => *status,
            BookingError::MissingData(_) => 502,
            BookingError::MissingSessionId => 400,
            BookingError::Configuration(_) => 500,
            BookingError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for booking operations
pub type BookingResult<T> = Result<T, BookingError>;
