//! # Backend Configuration
//!
//! Where the booking backend lives and how to talk to it.
//! Values come from environment variables (a `.env` file is honoured).

use std::env;
use trip_core::BookingError;

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Booking backend API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the REST API (e.g. "https://api.trips.example/api/v1")
    pub base_url: String,

    /// Bearer token used when a request carries none of its own
    pub bearer_token: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `TRIP_API_BASE_URL`
    ///
    /// Optional:
    /// - `TRIP_API_TOKEN`
    /// - `TRIP_API_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Result<Self, BookingError> {
        dotenvy::dotenv().ok();

        let base_url = env::var("TRIP_API_BASE_URL").map_err(|_| {
            BookingError::Configuration("TRIP_API_BASE_URL not set".to_string())
        })?;

        let timeout_secs = match env::var("TRIP_API_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                BookingError::Configuration(format!(
                    "TRIP_API_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self {
            base_url,
            bearer_token: env::var("TRIP_API_TOKEN").ok().filter(|t| !t.is_empty()),
            timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create config with explicit values
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Builder: set the default bearer token
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Builder: set the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Check the base URL scheme and timeout
    pub fn validate(&self) -> Result<(), BookingError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(BookingError::Configuration(
                "TRIP_API_BASE_URL must start with http:// or https://".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(BookingError::Configuration(
                "TRIP_API_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Absolute URL for an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        assert!(ApiConfig::new("https://api.trips.example").validate().is_ok());
        assert!(ApiConfig::new("http://localhost:5000/api/v1").validate().is_ok());
        assert!(ApiConfig::new("api.trips.example").validate().is_err());
        assert!(ApiConfig::new("https://api.trips.example")
            .with_timeout_secs(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_endpoint_joining() {
        let config = ApiConfig::new("http://localhost:5000/api/v1/");
        assert_eq!(
            config.endpoint("/bookings"),
            "http://localhost:5000/api/v1/bookings"
        );
        assert_eq!(
            config.endpoint("payments/confirm"),
            "http://localhost:5000/api/v1/payments/confirm"
        );
    }

    #[test]
    fn test_from_env_missing_base_url() {
        env::remove_var("TRIP_API_BASE_URL");

        let result = ApiConfig::from_env();
        assert!(result.is_err());
    }
}
