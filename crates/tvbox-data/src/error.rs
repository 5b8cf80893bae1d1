//! Error types for outbound calls.

use std::time::Duration;

/// Message the storefront shows when the catalog API reports a failure
/// without saying why.
pub const DEFAULT_CATALOG_ERROR: &str = "Ошибка загрузки товаров";

/// Reported when a create or update fails without a reason.
pub const DEFAULT_SAVE_ERROR: &str = "server error";

/// Reported when a delete fails without a reason.
pub const DEFAULT_DELETE_ERROR: &str = "delete failed";

/// Error type for catalog fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),

    /// The API answered with `ok: false`.
    #[error("Catalog API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Map a reqwest failure, keeping timeouts and connection errors apart
    /// so retry conditions can tell them from the rest.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(timeout)
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if err.is_decode() {
            FetchError::Deserialization(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Http {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Deserialization(e.to_string())
    }
}

/// Error type for the messaging relay.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Message text is required")]
    EmptyText,

    #[error("Telegram configuration not found")]
    NotConfigured,

    #[error("Request error: {0}")]
    Request(String),
}
