//! # trip-wasm
//!
//! WebAssembly bindings for trip-desk.
//!
//! This crate provides browser-side pieces of the payment hand-off:
//! - Full-page redirect to the payment provider via `window.location`
//! - Reading `session_id` off the return URL
//! - Participant clamping and amount formatting for the booking form
//! - A JSON-driven wrapper over the client state store
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { redirect_to_checkout, current_session_id, WasmStore } from 'trip-desk-wasm';
//!
//! await init();
//!
//! const { data } = await api.post('/payments/create-checkout-session', { bookingId });
//! redirect_to_checkout(data.url);
//!
//! // on /payment/success
//! const sessionId = current_session_id();
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

use trip_core::{
    clamp_pax as clamp, session_id_from_url, Action, Currency, RedirectHandoff, Store,
};
use wasm_bindgen::prelude::*;

/// Hand-off that navigates the current browsing context
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserRedirect;

impl RedirectHandoff for BrowserRedirect {
    fn redirect(&self, url: &str) {
        let assigned = web_sys::window()
            .map(|window| window.location().assign(url))
            .unwrap_or_else(|| Err(JsValue::from_str("no window")));

        if let Err(e) = assigned {
            web_sys::console::error_2(&JsValue::from_str("Redirect failed:"), &e);
        }
    }
}

/// Send the browser to the payment provider. There is no way back from here.
#[wasm_bindgen]
pub fn redirect_to_checkout(url: &str) -> Result<(), JsValue> {
    if url.trim().is_empty() {
        return Err(JsValue::from_str("Missing checkout URL"));
    }
    BrowserRedirect.redirect(url);
    Ok(())
}

/// `session_id` of the current page, if present
#[wasm_bindgen]
pub fn current_session_id() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    session_id_from_search(&search)
}

/// `session_id` from a query string such as `location.search`
#[wasm_bindgen]
pub fn session_id_from_search(search: &str) -> Option<String> {
    session_id_from_url(search)
}

/// Clamp a participant count to at least 1
#[wasm_bindgen]
pub fn clamp_pax(requested: f64) -> u32 {
    if requested.is_nan() {
        return 1;
    }
    clamp(requested.trunc() as i64)
}

/// Format an amount in the given currency (e.g. "$1200.00")
#[wasm_bindgen]
pub fn format_amount(amount: f64, currency: &str) -> String {
    Currency::parse(currency)
        .unwrap_or_default()
        .format_amount(amount)
}

/// Client state container driven by JSON actions
#[wasm_bindgen]
#[derive(Default)]
pub struct WasmStore {
    inner: Store,
}

#[wasm_bindgen]
impl WasmStore {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action such as `{"type":"booking_created","payload":{"booking_id":"b1"}}`
    pub fn dispatch(&mut self, action_json: &str) -> Result<(), JsValue> {
        let action: Action = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action: {}", e)))?;
        self.inner.dispatch(action);
        Ok(())
    }

    /// Current state as JSON
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.inner.state())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize state: {}", e)))
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state().auth.is_authenticated()
    }

    /// Booking created by the last checkout attempt
    pub fn last_booking_id(&self) -> Option<String> {
        self.inner.state().bookings.last_created.clone()
    }
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_pax() {
        assert_eq!(clamp_pax(0.0), 1);
        assert_eq!(clamp_pax(-3.0), 1);
        assert_eq!(clamp_pax(2.7), 2);
        assert_eq!(clamp_pax(f64::NAN), 1);
    }

    #[test]
    fn test_session_id_from_search() {
        assert_eq!(
            session_id_from_search("?session_id=cs_test_1"),
            Some("cs_test_1".to_string())
        );
        assert_eq!(session_id_from_search(""), None);
        assert_eq!(session_id_from_search("?foo=bar"), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1200.0, "usd"), "$1200.00");
        assert_eq!(format_amount(5000.0, "JPY"), "¥5000");
        assert_eq!(format_amount(10.0, "???"), "$10.00");
    }

    #[test]
    fn test_store_dispatch() {
        let mut store = WasmStore::new();
        store
            .dispatch(r#"{"type":"booking_created","payload":{"booking_id":"b1"}}"#)
            .unwrap();

        assert_eq!(store.last_booking_id(), Some("b1".to_string()));
        assert!(!store.is_authenticated());
        assert!(store.state_json().unwrap().contains("\"last_created\":\"b1\""));
    }
}
