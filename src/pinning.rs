//! HTTP client for the external JSON pinning service.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// Wire format the pinning service expects: the order payload wrapped under
/// `pinataContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PinRequest {
    pinata_content: Value,
}

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

pub struct PinningClient {
    client: reqwest::Client,
    endpoint: String,
}

impl PinningClient {
    pub fn new(endpoint: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build HTTP client");

        Self { client, endpoint }
    }

    /// Pin a JSON document and return its content identifier. A single
    /// attempt; any failure is terminal for the request.
    pub async fn pin_json(&self, jwt: &str, content: Value) -> Result<String, AppError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(jwt)
            .json(&PinRequest {
                pinata_content: content,
            })
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let details = read_error_details(response).await;
            tracing::warn!(%status, "pinning service rejected upload");
            return Err(AppError::UpstreamRejected {
                status: status.as_u16(),
                details,
            });
        }

        let parsed: PinResponse = response
            .json()
            .await
            .map_err(|e| AppError::LocalRequest(format!("invalid pinning response: {e}")))?;

        tracing::info!(ipfs_hash = %parsed.ipfs_hash, "order pinned");
        Ok(parsed.ipfs_hash)
    }
}

/// The request never reached the wire (builder failure) or left the process
/// without a response coming back (connect error, timeout, reset).
fn classify_send_error(e: reqwest::Error) -> AppError {
    if e.is_builder() {
        AppError::LocalRequest(e.to_string())
    } else {
        AppError::UpstreamUnreachable(e.to_string())
    }
}

/// Echo the upstream error body as structured JSON when possible, raw text
/// otherwise.
async fn read_error_details(response: reqwest::Response) -> Value {
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<Value>(&body) {
        Ok(v) => v,
        Err(_) => Value::String(body),
    }
}
