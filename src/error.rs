//! Error type for news retrieval.

use thiserror::Error;

/// Failure of a single news fetch.
///
/// Every failure is all-or-nothing for its request; there is no partial result.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The API answered with a non-success status. `info` holds the parsed
    /// error body (or the raw body as a JSON string when it was not JSON).
    #[error("An error occurred while fetching the data.")]
    Status {
        status: u16,
        info: serde_json::Value,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// HTTP status code, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport(e) => e.status().map(|s| s.as_u16()),
            FetchError::Decode(_) => None,
        }
    }

    /// Parsed error body, if any.
    pub fn info(&self) -> Option<&serde_json::Value> {
        match self {
            FetchError::Status { info, .. } => Some(info),
            _ => None,
        }
    }
}
