use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid or missing order key")]
    InvalidOrderKey,

    #[error("pinning credential not configured")]
    JwtNotConfigured,

    #[error("order key generation failed: {0}")]
    KeyGeneration(String),

    #[error("pinning service rejected upload (status {status})")]
    UpstreamRejected {
        status: u16,
        details: serde_json::Value,
    },

    #[error("no response from pinning service: {0}")]
    UpstreamUnreachable(String),

    #[error("failed to construct pinning request: {0}")]
    LocalRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidOrderKey => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Unauthorized: Invalid or missing order key." }),
            ),
            AppError::JwtNotConfigured => {
                tracing::error!("upload rejected: PINATA_JWT is not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Pinata JWT is not configured." }),
                )
            }
            AppError::KeyGeneration(e) => {
                tracing::error!("order key generation failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to generate order key." }),
                )
            }
            AppError::UpstreamRejected { status, details } => {
                tracing::error!(upstream_status = status, "pinning service rejected upload");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to upload order details to Pinata.",
                        "details": details,
                    }),
                )
            }
            AppError::UpstreamUnreachable(e) => {
                tracing::error!("no response from pinning service: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "No response received from Pinata API. Check your network or the Pinata service status.",
                    }),
                )
            }
            AppError::LocalRequest(e) => {
                tracing::error!("pinning request setup failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to upload order details." }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn response_parts(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn invalid_key_maps_to_401() {
        let (status, body) = response_parts(AppError::InvalidOrderKey).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized: Invalid or missing order key.");
    }

    #[tokio::test]
    async fn missing_jwt_maps_to_500_with_exact_message() {
        let (status, body) = response_parts(AppError::JwtNotConfigured).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Pinata JWT is not configured.");
    }

    #[tokio::test]
    async fn upstream_rejection_echoes_details() {
        let err = AppError::UpstreamRejected {
            status: 503,
            details: json!({ "reason": "overloaded" }),
        };
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to upload order details to Pinata.");
        assert_eq!(body["details"]["reason"], "overloaded");
    }

    #[tokio::test]
    async fn unreachable_upstream_has_generic_message_without_details() {
        let err = AppError::UpstreamUnreachable("connection refused".into());
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("No response received from Pinata API."));
        assert!(body.get("details").is_none());
    }
}
