//! Message construction
//!
//! Turns a build payload and plugin parameters into a HipChat [`Message`].
//! Template failures never abort construction; see [`Renderer::render`].

use crate::context::{BuildStatus, Payload};
use crate::params::Params;
use crate::template::Renderer;
use hipchat_client::{
    Activity, Card, CardFormat, CardStyle, Color, Description, Message, MessageFormat,
};
use tracing::{debug, warn};

/// Notification color for a build status
pub fn color_for(status: &BuildStatus) -> Color {
    match status {
        BuildStatus::Success => Color::Green,
        BuildStatus::Failure | BuildStatus::Error | BuildStatus::Killed => Color::Red,
        BuildStatus::Skipped
        | BuildStatus::Pending
        | BuildStatus::Running
        | BuildStatus::Unknown(_) => Color::Yellow,
    }
}

/// Build the notification for `payload`.
///
/// Empty templates and icon in `params` fall back to the built-in defaults.
/// A card is attached only when `params.use_card` is set.
pub fn build_message(renderer: &Renderer, payload: &Payload, params: &Params) -> Message {
    let params = params.clone().with_defaults();
    let text = renderer.render(payload, &params.template);

    let message = Message::new(
        params.from.clone(),
        color_for(&payload.build.status()),
        params.notify,
        text,
    );

    if params.use_card {
        let card = build_card(renderer, payload, &params, &message.message);
        message.with_card(card)
    } else {
        message
    }
}

fn build_card(
    renderer: &Renderer,
    payload: &Payload,
    params: &Params,
    activity_html: &str,
) -> Card {
    let title = renderer.render(payload, &params.card_title_template);
    let title = non_empty_or_label(title, payload);
    let body = non_empty_or_label(renderer.render(payload, &params.card_template), payload);
    let icon = Some(params.card_icon.clone()).filter(|icon| !icon.is_empty());

    let format = if params.card_format.is_empty() {
        None
    } else {
        match params.card_format.parse::<CardFormat>() {
            Ok(format) => Some(format),
            Err(err) => {
                warn!(error = %err, "ignoring card_format");
                None
            }
        }
    };

    debug!(id = %payload.build.commit, "attaching card");

    Card {
        id: payload.build.commit.clone(),
        style: CardStyle::Link,
        format,
        title,
        url: payload.build_link(),
        icon: icon.clone(),
        description: Some(Description {
            format: MessageFormat::Html,
            value: body,
        }),
        activity: Activity {
            html: activity_html.to_string(),
            icon,
        },
    }
}

fn non_empty_or_label(rendered: String, payload: &Payload) -> String {
    if rendered.is_empty() {
        payload.short_label()
    } else {
        rendered
    }
}
