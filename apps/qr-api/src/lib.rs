//! # SEPA QR API
//!
//! HTTP service that renders SEPA credit-transfer details as EPC QR codes.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          QR API Service                                 │
//! │                                                                         │
//! │  GET /api/payment ──► PaymentValidator ──► EPC payload ──► QR PNG      │
//! │         │                 (sepa-core)                                   │
//! │         └──── validation failure ──────────────────────► error PNG     │
//! │                                                                         │
//! │  GET /api/qrcode  ──► QR PNG of `data`                                 │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  AppState: ServiceConfig + CurrencyRegistry (built once)         │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HOST` / `PORT` - Bind address (default: 0.0.0.0:8080)
//! - `LOG_LEVEL` - NONE, ERROR, WARNING, INFO or DEBUG (default: DEBUG)
//! - `ANONYMIZE` - `false` disables log redaction (default: on)
//! - `ALLOWED_CURRENCIES` - Comma-separated currency codes
//! - `DEFAULT_CURRENCY` - Currency used when a request names none (default: EUR)
//! - `QR_SIZE` / `ERROR_IMAGE_SIZE` - Image edges in pixels (default: 256 / 200)

pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod routes;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use sepa_core::CurrencyRegistry;
use tower_http::trace::TraceLayer;

// Re-exports
pub use config::ServiceConfig;
pub use error::ApiError;

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    pub config: ServiceConfig,
    pub currencies: CurrencyRegistry,
}

impl AppState {
    /// Builds the state, applying the configured currency settings.
    pub fn new(config: ServiceConfig) -> Self {
        let currencies = config.currency_registry();
        AppState { config, currencies }
    }
}

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/qrcode", get(routes::qr_code))
        .route("/api/payment", get(routes::payment_qr_code))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
