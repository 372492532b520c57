//! # trip-gateway
//!
//! HTTP gateway in front of the trip-desk booking backend.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export TRIP_API_BASE_URL=http://localhost:5000/api/v1
//! export PUBLIC_URL=http://localhost:8080
//!
//! # Run the server
//! trip-gateway
//! ```

use trip_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    print_banner();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Booking backend: {}", state.backend.config().base_url);
    info!(
        "Provider return URL: {}",
        state.paths.success_url_with_session()
    );

    // Create router
    let app = routes::create_router(state);

    info!("🧳 Trip gateway starting on http://{}", addr);

    if !is_prod {
        info!("📝 Health: http://{}/health", addr);
        info!("💳 Checkout: POST http://{}/api/checkout-session", addr);
        info!("✅ Confirm: POST http://{}/api/payment/confirm", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `LOG_FORMAT=json` switches to structured output
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}

fn print_banner() {
    println!(
        r#"
  🧳 Trip Desk Gateway 🧳
  ━━━━━━━━━━━━━━━━━━━━━━━
  Booking & payment hand-off
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
