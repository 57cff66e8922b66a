//! Error types for talking to the movie review API.

use thiserror::Error;

/// Why a request to the API produced no usable document.
///
/// The bootstrap resolver collapses every variant into a single failed
/// outcome. Views only distinguish "has data" from "no data", using the
/// message for the inline error text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (network, DNS, timeout).
    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The server answered with a non-2xx status.
    #[error("Server returned {status}: {message}")]
    Protocol { status: u16, message: String },

    /// The body was not the JSON document we expected.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    pub fn transport(url: &str, reason: impl ToString) -> Self {
        FetchError::Transport {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(reason: impl ToString) -> Self {
        FetchError::Malformed(reason.to_string())
    }

    /// Message suitable for showing next to a failed view.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Transport { .. } => "The API could not be reached.".to_string(),
            FetchError::Protocol { message, .. } if !message.is_empty() => message.clone(),
            FetchError::Protocol { status, .. } => format!("Request failed ({status})"),
            FetchError::Malformed(_) => "The API sent an unexpected response.".to_string(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}
