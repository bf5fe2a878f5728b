//! HipChat Client: v2 room notifications
//!
//! This crate owns the wire shape of a HipChat room notification and the
//! single HTTP call that delivers it.
//!
//! ## Delivery policy
//!
//! One POST per notification. Responses with a status of 400 or above become
//! [`HipChatError::Delivery`]; every other status is treated as delivered.

pub mod client;
pub mod error;
pub mod message;

pub use client::{notification_url, HipChatClient, DEFAULT_URL};
pub use error::HipChatError;
pub use message::{
    Activity, Card, CardFormat, CardStyle, Color, Description, Message, MessageFormat,
};

/// Result type for HipChat operations
pub type Result<T> = std::result::Result<T, HipChatError>;
