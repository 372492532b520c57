//! # Package Types
//!
//! Travel packages as served by the booking backend. Packages are
//! read-only here; the booking flow only looks at `available_seats`
//! and `cost_from`.

use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    INR,
    BDT,
    JPY,
    AUD,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::BDT => "BDT",
            Currency::JPY => "JPY",
            Currency::AUD => "AUD",
        }
    }

    /// Number of decimal places (JPY has 0, the rest 2)
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::INR => "₹",
            Currency::BDT => "৳",
            Currency::JPY => "¥",
            Currency::AUD => "A$",
        }
    }

    /// Format a decimal amount for display (e.g. "$1200.00")
    pub fn format_amount(&self, amount: f64) -> String {
        if self.decimal_places() == 0 {
            format!("{}{}", self.symbol(), amount.round() as i64)
        } else {
            format!("{}{:.2}", self.symbol(), amount)
        }
    }

    /// Parse a currency code, case-insensitively
    pub fn parse(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "INR" => Some(Currency::INR),
            "BDT" => Some(Currency::BDT),
            "JPY" => Some(Currency::JPY),
            "AUD" => Some(Currency::AUD),
            _ => None,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One day of a package itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub day: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A travel package in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    #[serde(rename = "_id")]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub destination: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Starting price per participant
    #[serde(default)]
    pub cost_from: f64,

    #[serde(default)]
    pub currency: Currency,

    /// Seats the backend advertises; the client never enforces it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_seats: Option<u32>,

    /// Length of the trip in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub itinerary: Vec<ItineraryDay>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl Package {
    /// Estimated total for `pax` participants, from the advertised base price
    pub fn estimate_total(&self, pax: u32) -> f64 {
        self.cost_from * pax as f64
    }

    /// Price line for listings, e.g. "From $499.00"
    pub fn price_label(&self) -> String {
        format!("From {}", self.currency.format_amount(self.cost_from))
    }

    pub fn is_sold_out(&self) -> bool {
        matches!(self.available_seats, Some(0))
    }
}
