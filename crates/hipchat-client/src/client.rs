//! HipChat HTTP client
//!
//! Posts a [`Message`] to a room's notification endpoint and classifies the
//! response.

use crate::error::HipChatError;
use crate::message::Message;
use crate::Result;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use tracing::{debug, info, warn};

/// Public HipChat API host, used when no base URL is configured
pub const DEFAULT_URL: &str = "https://api.hipchat.com";

/// Build the notification endpoint for a room.
///
/// Room and token are interpolated as given; malformed values surface later
/// as a failed request.
pub fn notification_url(base_url: &str, room: &str, token: &str) -> String {
    let base_url = if base_url.is_empty() {
        DEFAULT_URL
    } else {
        base_url
    };
    format!("{base_url}/v2/room/{room}/notification?auth_token={token}")
}

/// Client bound to a single room notification endpoint
#[derive(Debug, Clone)]
pub struct HipChatClient {
    url: String,
    room: String,
    http_client: reqwest::Client,
}

impl HipChatClient {
    /// Create a client for `room` on `base_url` (empty means [`DEFAULT_URL`])
    pub fn new(base_url: &str, room: &str, token: &str) -> Result<Self> {
        // 3xx responses are reported as-is rather than followed
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("drone-hipchat/", env!("CARGO_PKG_VERSION")))
            .redirect(Policy::none())
            .build()?;

        Ok(HipChatClient {
            url: notification_url(base_url, room, token),
            room: room.to_string(),
            http_client,
        })
    }

    /// Fully-qualified endpoint, including the auth token
    pub fn endpoint(&self) -> &str {
        &self.url
    }

    /// Send a notification.
    ///
    /// Statuses below 400 count as delivered. A status of 400 or above
    /// returns [`HipChatError::Delivery`] with the response body.
    pub async fn send(&self, message: &Message) -> Result<()> {
        let body = serde_json::to_vec(message)?;

        debug!(room = %self.room, bytes = body.len(), "posting notification");

        let response = self
            .http_client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let code = status.as_u16();
            let body = response.text().await?;
            warn!(room = %self.room, code, "HipChat rejected notification");
            return Err(HipChatError::Delivery { code, body });
        }

        info!(room = %self.room, code = status.as_u16(), "notification delivered");
        Ok(())
    }
}
