//! # Routes
//!
//! Axum router configuration for the broker API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET    /health - Health check
/// - POST   /api/v1/orders - Create a payment order
/// - GET    /api/v1/orders - List tracked orders with aggregates
/// - GET    /api/v1/orders/{order_id} - Fetch one order
/// - DELETE /api/v1/orders - Clear the ledger
/// - POST   /api/v1/payments/verify - Verify a payment claim
pub fn create_router(state: AppState) -> Router {
    // The broker sits behind a browser client; origins are not known ahead
    // of time, so CORS stays open
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/orders",
            post(handlers::create_order)
                .get(handlers::list_orders)
                .delete(handlers::clear_orders),
        )
        .route("/orders/{order_id}", get(handlers::get_order))
        .route("/payments/verify", post(handlers::verify_payment));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
