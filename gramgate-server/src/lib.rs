//! # Gramgate Server
//!
//! HTTP gateway in front of a single shared direct-messaging client.
//!
//! Every endpoint runs the same three-stage pipeline: validate the request
//! body against its schema, dispatch exactly one operation on the shared
//! client context, and translate the returned envelope into an HTTP
//! response. The client context is serialized behind a mutex — correctness
//! over throughput, since the upstream service is rate-sensitive.

pub mod bootstrap;
pub mod errors;
pub mod gateway;
pub mod infra;
pub mod media_handlers;
pub mod messaging_handlers;
pub mod routes;
pub mod user_handlers;

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::infra::app_state::AppState;

/// Build the application router with the gateway middleware stack.
pub fn create_app(state: AppState) -> Router {
    routes::create_router(state)
        // Permissive CORS: the gateway fronts browser-hosted automation
        // tooling as well as server-side callers.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
}
