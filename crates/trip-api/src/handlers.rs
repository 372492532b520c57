//! # Request Handlers
//!
//! Axum request handlers for the gateway: the two forwarding endpoints,
//! the server-side checkout entry point, and the payment return pages.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Form, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use trip_core::{
    BookingBackend, CapturedRedirect, CheckoutFlow, CheckoutSessionRequest, CheckoutStage,
    ConfirmPaymentRequest, PackageSelection, PaymentResolver, ResolverState, HISTORY_CTA,
};
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Forwarded checkout-session request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionProxyRequest {
    #[serde(default)]
    pub booking_id: Option<String>,
}

/// Forwarded payment-confirmation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentProxyRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Package page form
#[derive(Debug, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    pub package: String,
    #[serde(default = "default_pax")]
    pub pax: i64,
    #[serde(default)]
    pub available_seats: Option<u32>,
}

fn default_pax() -> i64 {
    1
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

fn reply(status: StatusCode, message: &str) -> ErrorReply {
    (status, Json(ErrorResponse::new(message)))
}

/// Token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

fn required(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "trip-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Forward a checkout-session request with the caller's token
#[instrument(skip(state, headers, request))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<CheckoutSessionProxyRequest>, JsonRejection>,
) -> Result<Response, ErrorReply> {
    const FAILED: &str = "Failed to create checkout session";

    let Json(request) = request.map_err(|e| {
        warn!("Rejected checkout session body: {}", e);
        reply(StatusCode::INTERNAL_SERVER_ERROR, FAILED)
    })?;
    let booking_id = required(request.booking_id)
        .ok_or_else(|| reply(StatusCode::BAD_REQUEST, "bookingId is required"))?;

    let backend = state.backend_for(bearer_token(&headers).as_deref());
    let payload = backend
        .forward_checkout_session(&CheckoutSessionRequest {
            booking_id: booking_id.clone(),
        })
        .await
        .map_err(|e| {
            error!(booking_id = %booking_id, "Checkout session forwarding failed: {}", e);
            reply(StatusCode::INTERNAL_SERVER_ERROR, FAILED)
        })?;

    info!(booking_id = %booking_id, "Checkout session created");
    Ok(Json(payload).into_response())
}

/// Forward a payment confirmation with the caller's token
#[instrument(skip(state, headers, request))]
pub async fn confirm_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<ConfirmPaymentProxyRequest>, JsonRejection>,
) -> Result<Response, ErrorReply> {
    const FAILED: &str = "Failed to confirm payment";

    let Json(request) = request.map_err(|e| {
        warn!("Rejected payment confirmation body: {}", e);
        reply(StatusCode::INTERNAL_SERVER_ERROR, FAILED)
    })?;
    let session_id = required(request.session_id)
        .ok_or_else(|| reply(StatusCode::BAD_REQUEST, "sessionId is required"))?;

    let backend = state.backend_for(bearer_token(&headers).as_deref());
    let payload = backend
        .confirm_payment(&ConfirmPaymentRequest {
            session_id: session_id.clone(),
        })
        .await
        .map_err(|e| {
            error!(session_id = %session_id, "Payment confirmation forwarding failed: {}", e);
            reply(StatusCode::INTERNAL_SERVER_ERROR, FAILED)
        })?;

    info!(session_id = %session_id, "Payment confirmed");
    Ok(Json(payload).into_response())
}

/// Book a package and send the browser to the payment provider
#[instrument(skip(state, headers, form), fields(package = %form.package, pax = form.pax))]
pub async fn book(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<BookForm>,
) -> Response {
    let backend = state.backend_for(bearer_token(&headers).as_deref());
    let handoff = CapturedRedirect::new();

    let mut selection = PackageSelection::new(form.package, form.pax);
    selection.available_seats = form.available_seats;

    let mut flow = CheckoutFlow::new();
    match flow.start(&backend, &handoff, &selection).await {
        CheckoutStage::HandedOff { url, .. } => Redirect::to(url).into_response(),
        CheckoutStage::Failed { message } => (
            StatusCode::BAD_GATEWAY,
            Html(status_page("❌", "Booking failed", message, None)),
        )
            .into_response(),
        other => {
            error!(stage = ?other, "Checkout flow stopped in a non-terminal stage");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(status_page("❌", "Booking failed", trip_core::GENERIC_FAILURE, None)),
            )
                .into_response()
        }
    }
}

/// Return page after payment: verify once and show the outcome
#[instrument(skip(state, headers))]
pub async fn payment_success(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let mut resolver = PaymentResolver::mount(&uri.to_string());
    let backend = state.backend_for(bearer_token(&headers).as_deref());
    let history = state.paths.history_url();

    let has_session = resolver.session_id().is_some();
    match resolver.resolve(&backend).await {
        ResolverState::Success { message } => Html(status_page(
            "✅",
            "Payment Successful!",
            message,
            Some(&history),
        ))
        .into_response(),
        ResolverState::Error { message } => {
            let status = if has_session {
                StatusCode::BAD_GATEWAY
            } else {
                StatusCode::BAD_REQUEST
            };
            (
                status,
                Html(status_page("⚠️", "Payment Not Confirmed", message, Some(&history))),
            )
                .into_response()
        }
        ResolverState::Pending => Html(status_page(
            "⏳",
            "Confirming Payment",
            "Please wait while we confirm your payment.",
            None,
        ))
        .into_response(),
    }
}

/// Checkout cancel page
pub async fn payment_cancel(State(state): State<AppState>) -> impl IntoResponse {
    Html(status_page(
        "❌",
        "Payment Cancelled",
        "No charges were made. Your booking stays pending until you pay.",
        Some(&state.paths.history_url()),
    ))
}

// =============================================================================
// Pages
// =============================================================================

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn status_page(icon: &str, title: &str, message: &str, history_url: Option<&str>) -> String {
    let cta = history_url
        .map(|url| {
            format!(
                r#"<p><a href="{}" style="display: inline-block; padding: 12px 24px; background: #0f766e; color: white; border-radius: 8px; text-decoration: none;">{}</a></p>"#,
                escape_html(url),
                HISTORY_CTA
            )
        })
        .unwrap_or_default();

    format!(
        r#"
<!DOCTYPE html>
<html>
<head><title>{title}</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: linear-gradient(135deg, #0f172a 0%, #134e4a 100%);">
    <div style="background: white; padding: 60px; border-radius: 16px; text-align: center;">
        <div style="font-size: 60px;">{icon}</div>
        <h1>{title}</h1>
        <p style="color: #666;">{message}</p>
        {cta}
    </div>
</body>
</html>
"#,
        title = escape_html(title),
        icon = icon,
        message = escape_html(message),
        cta = cta
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer jwt-abc"));
        assert_eq!(bearer_token(&headers), Some("jwt-abc".to_string()));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_required() {
        assert_eq!(required(Some(" b1 ".into())), Some("b1".to_string()));
        assert_eq!(required(Some("  ".into())), None);
        assert_eq!(required(None), None);
    }

    #[test]
    fn test_status_page_escapes_message() {
        let page = status_page("❌", "Booking failed", "<script>x</script>", None);
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
        assert!(!page.contains(HISTORY_CTA));
    }

    #[test]
    fn test_status_page_history_link() {
        let page = status_page("✅", "Done", "ok", Some("https://trips.example/dashboard/payments"));
        assert!(page.contains(HISTORY_CTA));
        assert!(page.contains("https://trips.example/dashboard/payments"));
    }
}
