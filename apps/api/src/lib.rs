//! # Levy API
//!
//! HTTP front for the Levy tax calculator and user registry.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Levy API                                      │
//! │                                                                         │
//! │  request ──► TraceLayer ──► Router ──► handler (routes/)               │
//! │                                          │                              │
//! │                     ┌────────────────────┼──────────────────┐          │
//! │                     ▼                    ▼                  ▼          │
//! │             levy_core::tax      UserService (services/)   AppError     │
//! │             RateTable               │                    {"detail"}    │
//! │                                     ▼                                   │
//! │                              levy_db::Session                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`] for the `LEVY_*` environment variables.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

// Re-exports
pub use config::ApiConfig;
pub use error::AppError;
pub use state::AppState;

/// Builds the application router with request tracing.
pub fn router(state: AppState) -> Router {
    routes::routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
