//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Greeting
//! GET  /hello/{name}             - Personal greeting
//! GET  /health                   - Liveness
//! GET  /health/ready             - Readiness (database reachable, schema current)
//!
//! # Tax
//! POST /tax/calculate            - Tax for one amount
//! POST /tax/calculate-items      - Tax for a list of line items
//! GET  /tax/rates                - All country rates
//! GET  /tax/rate/{country_code}  - One country's rate
//!
//! # Users (trailing slash optional)
//! POST /users                    - Register
//! GET  /users?skip=&limit=       - List in registration order
//! GET  /users/{user_id}          - Fetch one
//! ```

pub mod root;
pub mod tax;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the tax routes router.
pub fn tax_routes() -> Router<AppState> {
    Router::new()
        .route("/tax/calculate", post(tax::calculate))
        .route("/tax/calculate-items", post(tax::calculate_items))
        .route("/tax/rates", get(tax::rates))
        .route("/tax/rate/{country_code}", get(tax::rate))
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/", get(users::list).post(users::create))
        .route("/users/{user_id}", get(users::show))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root::index))
        .route("/hello/{name}", get(root::hello))
        .route("/health", get(root::health))
        .route("/health/ready", get(root::readiness))
        .merge(tax_routes())
        .merge(user_routes())
}
