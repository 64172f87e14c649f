//! Fetches remote documents on behalf of the browser.

use serde_json::Value;
use thiserror::Error;

use crate::domain::types::DocumentUrl;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProxyError {
    #[error("url is required and must be a string")]
    MissingUrl,

    #[error("invalid url")]
    InvalidUrl,

    #[error("upstream responded with status {0}")]
    Upstream(u16),

    #[error("failed to fetch document: {0}")]
    Transport(String),
}

impl ProxyError {
    /// HTTP status reported to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::MissingUrl | ProxyError::InvalidUrl => 400,
            ProxyError::Upstream(status) => *status,
            ProxyError::Transport(_) => 500,
        }
    }
}

/// Extracts the document URL from a `{"url": "..."}` request body.
pub fn parse_proxy_request(body: &[u8]) -> Result<DocumentUrl, ProxyError> {
    let payload: Value = serde_json::from_slice(body).map_err(|_| ProxyError::MissingUrl)?;
    let url = payload
        .get("url")
        .and_then(Value::as_str)
        .ok_or(ProxyError::MissingUrl)?;

    DocumentUrl::new(url).map_err(|_| ProxyError::InvalidUrl)
}

/// Downloads the document, passing an upstream failure status through.
pub async fn fetch_document(
    client: &reqwest::Client,
    url: &DocumentUrl,
) -> Result<Vec<u8>, ProxyError> {
    let response = client.get(url.as_str()).send().await.map_err(|e| {
        log::error!("Document request to {url} failed: {e}");
        ProxyError::Transport(e.to_string())
    })?;

    let status = response.status();
    if !status.is_success() {
        log::error!("Document request to {url} returned {status}");
        return Err(ProxyError::Upstream(status.as_u16()));
    }

    let body = response.bytes().await.map_err(|e| {
        log::error!("Failed reading document body from {url}: {e}");
        ProxyError::Transport(e.to_string())
    })?;

    Ok(body.to_vec())
}
