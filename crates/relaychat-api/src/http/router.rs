//! Axum router configuration with middleware.
//!
//! Relay routes live under `/api`; `/health` sits at the root.
//! Middleware: CORS (any origin, GET/POST, Content-Type), a body limit sized
//! for inline image data, and request tracing.

use axum::Router;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{Method, header};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Largest accepted request body. Gemini caps a whole inline-data request at
/// 20 MB, and base64 adds a third on top of the raw image bytes.
pub const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/save-chat", post(handlers::transcript::save_chat))
        .route("/get-chat", get(handlers::transcript::get_chat));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness plus a database probe.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    let database = match state.db_pool.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Health check database probe failed");
            "unavailable"
        }
    };

    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    }))
}
