//! # REST Client
//!
//! `reqwest` implementation of the booking backend traits. Every call is a
//! single JSON request; non-2xx answers become `BookingError::Http` carrying
//! the body's `message` when there is one.

use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};
use trip_core::{
    Booking, BookingBackend, BookingError, BookingRecord, BookingResult, BookingStatus,
    CatalogBackend, CheckoutSessionBody, CheckoutSessionRequest, ConfirmPaymentRequest,
    CreateBookingRequest, Envelope, Package, PaymentRecord, UpdateBookingStatusRequest,
};

/// Backend API paths, relative to the configured base URL
pub mod paths {
    pub const BOOKINGS: &str = "/bookings";
    pub const MY_BOOKINGS: &str = "/bookings/my-bookings";
    pub const CHECKOUT_SESSION: &str = "/payments/create-checkout-session";
    pub const CONFIRM_PAYMENT: &str = "/payments/confirm";
    pub const MY_PAYMENTS: &str = "/payments/my-payments";
    pub const PACKAGES: &str = "/packages";
}

/// HTTP client for the booking backend
#[derive(Clone)]
pub struct RestClient {
    config: ApiConfig,
    client: Client,
    bearer_token: Option<String>,
}

impl RestClient {
    /// Create a new client
    pub fn new(config: ApiConfig) -> BookingResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BookingError::Configuration(format!("HTTP client: {}", e)))?;

        let bearer_token = config.bearer_token.clone();
        Ok(Self {
            config,
            client,
            bearer_token,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> BookingResult<Self> {
        let config = ApiConfig::from_env()?;
        Self::new(config)
    }

    /// Same connection pool, different caller identity
    pub fn with_bearer_token(&self, token: impl Into<String>) -> Self {
        Self {
            config: self.config.clone(),
            client: self.client.clone(),
            bearer_token: Some(token.into()),
        }
    }

    /// Same connection pool, no caller identity
    pub fn without_bearer_token(&self) -> Self {
        Self {
            config: self.config.clone(),
            client: self.client.clone(),
            bearer_token: None,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.config.endpoint(path));
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode a 2xx JSON body
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> BookingResult<T> {
        let response = builder
            .send()
            .await
            .map_err(|e| BookingError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BookingError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Backend error: status={}, body={}", status, body);
            return Err(BookingError::Http {
                status: status.as_u16(),
                body_message: body_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            BookingError::Serialization(format!("Failed to parse backend response: {}", e))
        })
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> BookingResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> BookingResult<T> {
        self.send(self.request(Method::GET, path)).await
    }
}

impl RestClient {
    /// Create a checkout session and hand back the backend body untouched
    #[instrument(skip(self, request), fields(booking_id = %request.booking_id))]
    pub async fn forward_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> BookingResult<serde_json::Value> {
        debug!("Forwarding checkout session");
        self.post_json(paths::CHECKOUT_SESSION, request).await
    }
}

/// Error body shape: `{ "message": "..." }`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

fn body_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

#[async_trait]
impl BookingBackend for RestClient {
    #[instrument(skip(self, request), fields(package = %request.package, pax = request.pax))]
    async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> BookingResult<Envelope<BookingRecord>> {
        debug!("Creating booking");
        self.post_json(paths::BOOKINGS, request).await
    }

    #[instrument(skip(self, request), fields(booking_id = %request.booking_id))]
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> BookingResult<Envelope<CheckoutSessionBody>> {
        debug!("Creating checkout session");
        self.post_json(paths::CHECKOUT_SESSION, request).await
    }

    #[instrument(skip(self, request), fields(session_id = %request.session_id))]
    async fn confirm_payment(
        &self,
        request: &ConfirmPaymentRequest,
    ) -> BookingResult<serde_json::Value> {
        debug!("Confirming payment");
        self.post_json(paths::CONFIRM_PAYMENT, request).await
    }
}

#[async_trait]
impl CatalogBackend for RestClient {
    #[instrument(skip(self))]
    async fn list_packages(&self) -> BookingResult<Vec<Package>> {
        let envelope: Envelope<Vec<Package>> = self.get_json(paths::PACKAGES).await?;
        Ok(envelope.into_inner())
    }

    #[instrument(skip(self))]
    async fn get_package(&self, package_id: &str) -> BookingResult<Package> {
        let path = format!("{}/{}", paths::PACKAGES, package_id);
        let envelope: Envelope<Package> = self.get_json(&path).await?;
        Ok(envelope.into_inner())
    }

    #[instrument(skip(self))]
    async fn my_bookings(&self) -> BookingResult<Vec<Booking>> {
        let envelope: Envelope<Vec<Booking>> = self.get_json(paths::MY_BOOKINGS).await?;
        Ok(envelope.into_inner())
    }

    #[instrument(skip(self))]
    async fn payment_history(&self) -> BookingResult<Vec<PaymentRecord>> {
        let envelope: Envelope<Vec<PaymentRecord>> = self.get_json(paths::MY_PAYMENTS).await?;
        Ok(envelope.into_inner())
    }

    #[instrument(skip(self))]
    async fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
    ) -> BookingResult<Booking> {
        let path = format!("{}/{}/status", paths::BOOKINGS, booking_id);
        let builder = self
            .request(Method::PATCH, &path)
            .json(&UpdateBookingStatusRequest { status });
        let envelope: Envelope<Booking> = self.send(builder).await?;
        Ok(envelope.into_inner())
    }
}
