//! Axum router configuration with middleware.
//!
//! Routes live under `/chat`, plus `/health`.
//! Middleware: permissive CORS, request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let chat_routes = Router::new()
        .route("/message", post(handlers::chat::send_message))
        .route("/history", get(handlers::chat::missing_session_id))
        .route("/history/", get(handlers::chat::missing_session_id))
        .route("/history/{session_id}", get(handlers::chat::get_history));

    Router::new()
        .nest("/chat", chat_routes)
        .route("/health", get(handlers::health::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
