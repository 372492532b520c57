//! # Routes
//!
//! Axum router configuration for the gateway.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Forwarding:
///   - POST /api/checkout-session - create a checkout session for a booking
///   - POST /api/payment/confirm  - confirm a returned payment session
///
/// - Checkout:
///   - POST /book - book a package and redirect to the payment provider
///
/// - Return pages:
///   - GET /payment/success - verify the payment once and show the outcome
///   - GET /payment/cancel  - cancellation page
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/checkout-session", post(handlers::create_checkout_session))
        .route("/payment/confirm", post(handlers::confirm_payment));

    let payment_routes = Router::new()
        .route("/success", get(handlers::payment_success))
        .route("/cancel", get(handlers::payment_cancel));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .route("/book", post(handlers::book))
        .nest("/api", api_routes)
        .nest("/payment", payment_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
