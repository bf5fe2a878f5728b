//! Notification payload
//!
//! Mirrors the JSON body accepted by `POST /v2/room/{room}/notification`.
//! Optional parts of a card are `Option`s and are left out of the encoded
//! body entirely when unset.

use serde::{Deserialize, Serialize};

/// Background color of a room notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Yellow,
    Green,
    Red,
    Purple,
    Gray,
    Random,
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Red => "red",
            Color::Purple => "purple",
            Color::Gray => "gray",
            Color::Random => "random",
        };
        f.write_str(name)
    }
}

/// How HipChat interprets `message` and card descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    #[default]
    Html,
    Text,
}

/// Card rendering style. Only link cards are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStyle {
    #[default]
    Link,
}

/// Card layout hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardFormat {
    Compact,
    Medium,
}

impl std::str::FromStr for CardFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(CardFormat::Compact),
            "medium" => Ok(CardFormat::Medium),
            other => Err(format!("unknown card format: {other}")),
        }
    }
}

/// Formatted body of a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub format: MessageFormat,
    pub value: String,
}

/// Activity line shown for the card in the room history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub html: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Rich attachment shown alongside a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Cards sharing an id may be collapsed by HipChat
    pub id: String,
    pub style: CardStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<CardFormat>,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    pub activity: Activity,
}

/// A room notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub from: String,
    pub color: Color,
    pub notify: bool,
    pub message: String,
    pub message_format: MessageFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
}

impl Message {
    /// Create an HTML notification without a card
    pub fn new(
        from: impl Into<String>,
        color: Color,
        notify: bool,
        message: impl Into<String>,
    ) -> Self {
        Message {
            from: from.into(),
            color,
            notify,
            message: message.into(),
            message_format: MessageFormat::Html,
            card: None,
        }
    }

    /// Attach a card
    pub fn with_card(mut self, card: Card) -> Self {
        self.card = Some(card);
        self
    }
}
