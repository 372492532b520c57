//! # Booking Types
//!
//! Booking records, their status enums, and the request/response bodies
//! exchanged with the booking backend during checkout.

use crate::package::{Currency, Package};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking. Only the backend moves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        }
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Pending
    }
}

/// Payment status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Refunded,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "UNPAID",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Refunded => "REFUNDED",
            PaymentStatus::Failed => "FAILED",
        }
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unpaid
    }
}

/// The `package` field of a booking: an id, or the populated package
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PackageRef {
    Id(String),
    Populated(Box<Package>),
}

impl PackageRef {
    pub fn id(&self) -> &str {
        match self {
            PackageRef::Id(id) => id,
            PackageRef::Populated(package) => &package.id,
        }
    }
}

/// A booking as listed by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,

    pub package: PackageRef,

    /// Participant count
    pub pax: u32,

    #[serde(default)]
    pub status: BookingStatus,

    #[serde(default)]
    pub payment_status: PaymentStatus,

    #[serde(default)]
    pub total_amount: f64,

    #[serde(default)]
    pub currency: Currency,

    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Whether checkout can still be started for this booking
    pub fn awaiting_payment(&self) -> bool {
        self.status == BookingStatus::Pending && self.payment_status == PaymentStatus::Unpaid
    }

    pub fn total_display(&self) -> String {
        self.currency.format_amount(self.total_amount)
    }
}

/// Body of the create-booking call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// Package identifier
    pub package: String,
    /// Participant count, already clamped to at least 1
    pub pax: u32,
}

/// Create-booking response payload, after envelope normalization.
///
/// Only `_id` matters to the flow; everything else is kept for logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,

    #[serde(default)]
    pub status: Option<BookingStatus>,

    #[serde(default)]
    pub total_amount: Option<f64>,
}

/// Body of the create-checkout-session call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    pub booking_id: String,
}

/// Create-checkout-session response payload, after envelope normalization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutSessionBody {
    /// Hosted payment page to hand the browser to
    #[serde(default)]
    pub url: Option<String>,

    /// Provider session id, when the backend echoes it
    #[serde(default, alias = "sessionId")]
    pub id: Option<String>,
}

/// Body of the confirm-payment call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    pub session_id: String,
}

/// Body of the admin status-update call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

/// A row of the user's payment history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[serde(rename = "_id")]
    pub id: String,

    /// Booking this payment settles
    pub booking: String,

    pub amount: f64,

    #[serde(default)]
    pub currency: Currency,

    pub status: PaymentStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Clamp a requested participant count to at least one
pub fn clamp_pax(requested: i64) -> u32 {
    requested.clamp(1, u32::MAX as i64) as u32
}

/// Whether `pax` goes past the advertised seat count. Advisory only.
pub fn exceeds_available(pax: u32, available_seats: Option<u32>) -> bool {
    available_seats.map(|seats| pax > seats).unwrap_or(false)
}
