//! drone-hipchat: HipChat notifications for Drone builds
//!
//! Reads the Drone plugin parameters, renders the notification text from
//! Handlebars templates and posts it to a HipChat room.
//!
//! ## Failure policy
//!
//! Template problems degrade to error text in the message body and the
//! notification is still sent. Serialization, transport and delivery
//! failures are returned to the caller.

pub mod builder;
pub mod context;
pub mod error;
pub mod params;
pub mod telemetry;
pub mod template;

pub use builder::{build_message, color_for};
pub use context::{Build, BuildStatus, Payload, Repo, System};
pub use error::PluginError;
pub use params::{Params, PluginInput};
pub use template::Renderer;

use hipchat_client::{HipChatClient, Message};
use tracing::info;

/// Build the notification for `payload` and deliver it once.
///
/// Returns the message that was sent.
pub async fn notify(payload: &Payload, params: &Params) -> hipchat_client::Result<Message> {
    let renderer = Renderer::new();
    let message = build_message(&renderer, payload, params);

    let client = HipChatClient::new(&params.url, &params.room, &params.token)?;
    info!(
        room = %params.room,
        build = payload.build.number,
        status = %payload.build.status(),
        card = message.card.is_some(),
        "sending HipChat notification"
    );
    client.send(&message).await?;

    Ok(message)
}
