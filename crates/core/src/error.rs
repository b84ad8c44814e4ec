use thiserror::Error;

use crate::transport::TransportError;

/// Message used when a failed response carries no body.
pub const DEFAULT_ERROR_MESSAGE: &str = "API error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("company listing was empty")]
    EmptyListing,
}

impl ApiError {
    /// Builds the error for a non-2xx response from its body text.
    pub fn status(status: u16, body: String) -> Self {
        let message = if body.is_empty() {
            DEFAULT_ERROR_MESSAGE.to_string()
        } else {
            body
        };
        Self::Status { status, message }
    }
}
