//! Error types for hipchat-client

use thiserror::Error;

/// Errors that can occur while delivering a notification
#[derive(Error, Debug)]
pub enum HipChatError {
    /// The message could not be encoded as JSON
    #[error("failed to serialize notification: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request never produced a usable response (DNS, connect, TLS,
    /// timeout, or a failure reading the response body)
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// HipChat answered with a client or server error status
    #[error("HipChatError: {code} {body}")]
    Delivery { code: u16, body: String },
}

impl HipChatError {
    /// Status code of a delivery error, if this is one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HipChatError::Delivery { code, .. } => Some(*code),
            _ => None,
        }
    }
}
