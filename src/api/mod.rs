use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub mod handlers;

/// Build the relay router. The caller attaches state and outer layers.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route(
            "/api/generate-order-key",
            post(handlers::generate_order_key),
        )
        .route("/api/upload-order", post(handlers::upload_order))
}
