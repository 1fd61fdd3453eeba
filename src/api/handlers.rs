use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::AppState;

// ── Response DTOs ────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateKeyResponse {
    pub order_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOrderResponse {
    pub ipfs_hash: String,
}

// ── Handlers ─────────────────────────────────────────────────

/// `POST /api/generate-order-key`: issue a fresh single-use order key.
pub async fn generate_order_key(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GenerateKeyResponse>, AppError> {
    let order_key = state.registry.issue()?;
    tracing::debug!(%order_key, "issued new order key");
    Ok(Json(GenerateKeyResponse { order_key }))
}

/// `POST /api/upload-order`: redeem the `orderKey` field, then forward the
/// remaining payload to the pinning service.
///
/// The key is burned on first use attempt, before the outbound call and
/// before the credential check. A redeemed key is never restored, even if
/// the upload fails.
pub async fn upload_order(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<UploadOrderResponse>, AppError> {
    let Value::Object(mut order) = body else {
        tracing::warn!("rejected upload: body is not a JSON object");
        return Err(AppError::InvalidOrderKey);
    };

    let Some(Value::String(order_key)) = order.remove("orderKey") else {
        tracing::warn!("rejected upload: missing order key");
        return Err(AppError::InvalidOrderKey);
    };

    if !state.registry.redeem(&order_key) {
        tracing::warn!(%order_key, "rejected upload: unknown or already-used order key");
        return Err(AppError::InvalidOrderKey);
    }

    let jwt = state
        .config
        .pinata_jwt
        .as_deref()
        .ok_or(AppError::JwtNotConfigured)?;

    tracing::debug!(%order_key, "forwarding order to pinning service");
    let ipfs_hash = state.pinning.pin_json(jwt, Value::Object(order)).await?;

    Ok(Json(UploadOrderResponse { ipfs_hash }))
}
