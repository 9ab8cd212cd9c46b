// Route modules
pub mod membership;
pub mod paywall;
pub mod purchase;

use std::time::Duration;

use crate::{
    app_state::AppState,
    middleware::{identity_middleware, logging_middleware},
    models::common::MessageResponse,
};
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    create_router_with_timeout(state, DEFAULT_REQUEST_TIMEOUT)
}

pub fn create_router_with_timeout(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_v1_routes())
        // Inside SetRequestIdLayer so log lines carry the assigned request id
        .layer(middleware::from_fn(logging_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}

/// API v1 routes, all scoped to the calling user
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/paywall", get(paywall::get_paywall))
        .route("/membership", get(membership::get_membership))
        .route("/purchases", post(purchase::create_purchase))
        .layer(middleware::from_fn(identity_middleware))
}

/// GET /health
async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::new("ok"))
}
