//! alphaloan library - HTTP handlers and application setup.
//!
//! this crate provides the http server for the vehicle-loan origination
//! workflow:
//! - [`handlers`]: http request handlers for the loan api endpoints
//! - [`cli`]: command-line interface implementation

#![warn(missing_docs)]

/// command-line interface implementation.
pub mod cli;
/// http request handlers for the loan api endpoints.
pub mod handlers;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use alphaloan_db::AlphaloanDb;
use alphaloan_types::Config;

/// shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// database connection for persistent storage.
    pub db: AlphaloanDb,
    /// server configuration.
    pub config: Config,
}

/// create the axum application with all routes.
pub fn create_app(db: AlphaloanDb, config: Config) -> Router {
    let state = AppState { db, config };

    Router::new()
        .route("/api/loan/submit", post(handlers::submit_loan))
        .route("/api/loan/submissions", get(handlers::list_submissions))
        .route(
            "/api/loan/submission/track",
            get(handlers::track_submission),
        )
        .route("/api/loan/customers", get(handlers::list_customers))
        .route(
            "/api/loan/customer/{customer_id}/info",
            get(handlers::get_customer_info),
        )
        .route(
            "/api/loan/customer/{customer_id}/update",
            patch(handlers::update_customer),
        )
        .route(
            "/api/loan/customer/{customer_id}/delete",
            delete(handlers::delete_customer),
        )
        .route("/health", get(handlers::health))
        .with_state(state)
}
