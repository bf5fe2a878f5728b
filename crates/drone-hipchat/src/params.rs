//! Plugin parameters
//!
//! Drone hands the plugin one JSON document holding `system`, `repo`,
//! `build` and the plugin-specific `vargs` block. Empty `vargs` strings mean
//! "use the default".

use crate::context::{Build, Payload, Repo, System};
use crate::error::{PluginError, Result};
use serde::{Deserialize, Deserializer};

pub const DEFAULT_TEMPLATE: &str = r#"<strong>{{ uppercasefirst build.status }}</strong> <a href="{{ system.link_url }}/{{ repo.owner }}/{{ repo.name }}/{{ build.number }}">{{ repo.owner }}/{{ repo.name }}#{{ truncate build.commit 8 }}</a> ({{ build.branch }}) by {{ build.author }} in {{ duration build.started_at build.finished_at }} </br> - {{ build.message }}"#;

pub const DEFAULT_CARD_TITLE_TEMPLATE: &str = "{{ build.status }}";

pub const DEFAULT_CARD_TEMPLATE: &str = r#"<strong>{{ repo.name }}</strong> ({{ build.branch }}) by {{ build.author }} in {{ duration build.started_at build.finished_at }} <a href="{{ build.link_url }}">{{ truncate build.commit 8 }}</a> - <i>{{ build.message }}</i>"#;

pub const DEFAULT_CARD_ICON: &str = "http://readme.drone.io/logos/downstream.svg";

/// The `vargs` block
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Sender name shown in the room
    pub from: String,
    /// Accepted for compatibility; the color is always derived from the build status
    pub color: String,
    pub notify: bool,
    pub template: String,
    pub use_card: bool,
    pub card_title_template: String,
    pub card_template: String,
    pub card_icon: String,
    /// `compact` or `medium`; empty leaves the layout to HipChat
    pub card_format: String,
    /// HipChat base URL; empty means the public API host
    pub url: String,
    #[serde(deserialize_with = "deserialize_room")]
    pub room: String,
    pub token: String,
}

impl Params {
    /// Fill empty templates and icon with the built-in defaults
    pub fn with_defaults(mut self) -> Self {
        if self.template.is_empty() {
            self.template = DEFAULT_TEMPLATE.to_string();
        }
        if self.card_title_template.is_empty() {
            self.card_title_template = DEFAULT_CARD_TITLE_TEMPLATE.to_string();
        }
        if self.card_template.is_empty() {
            self.card_template = DEFAULT_CARD_TEMPLATE.to_string();
        }
        if self.card_icon.is_empty() {
            self.card_icon = DEFAULT_CARD_ICON.to_string();
        }
        self
    }

    /// Replace delivery settings with any values given outside of `vargs`
    pub fn with_overrides(
        mut self,
        url: Option<String>,
        room: Option<String>,
        token: Option<String>,
    ) -> Self {
        if let Some(url) = url {
            self.url = url;
        }
        if let Some(room) = room {
            self.room = room;
        }
        if let Some(token) = token {
            self.token = token;
        }
        self
    }
}

/// Full plugin input as delivered by Drone
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PluginInput {
    pub system: System,
    pub repo: Repo,
    pub build: Build,
    pub vargs: Params,
}

impl PluginInput {
    /// Parse the plugin JSON document
    pub fn from_json(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(PluginError::EmptyInput);
        }
        Ok(serde_json::from_str(input)?)
    }

    /// Split into template payload and plugin parameters
    pub fn into_parts(self) -> (Payload, Params) {
        let payload = Payload {
            system: self.system,
            repo: self.repo,
            build: self.build,
        };
        (payload, self.vargs)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RoomScalar {
    Text(String),
    Number(serde_json::Number),
}

impl RoomScalar {
    fn into_string(self) -> String {
        match self {
            RoomScalar::Text(s) => s,
            RoomScalar::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RoomValue {
    One(RoomScalar),
    Many(Vec<RoomScalar>),
}

/// A room may be a string, a number, or a list of either; lists collapse to
/// a comma-separated string.
fn deserialize_room<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let room = Option::<RoomValue>::deserialize(deserializer)?;
    Ok(match room {
        None => String::new(),
        Some(RoomValue::One(room)) => room.into_string(),
        Some(RoomValue::Many(rooms)) => rooms
            .into_iter()
            .map(RoomScalar::into_string)
            .collect::<Vec<_>>()
            .join(","),
    })
}
