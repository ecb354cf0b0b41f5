use std::fmt::Debug;

use serde::{ser::SerializeStruct, Serialize};

use super::{primitive_view::PrimitiveView, slack_view::SlackView};

/// A section component.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct SlackSection {
    #[serde(rename = "type")]
    _type: &'static str,
    text: SlackText,
}

impl SlackSection {
    /// A convenience constructor to create a section from markdown.
    pub fn from_markdown(markdown: &str) -> Self {
        Self {
            _type: "section",
            text: SlackText::markdown(markdown),
        }
    }

    /// A convenience constructor to create a section from plain text.
    pub fn from_plaintext(text: &str) -> Self {
        Self {
            _type: "section",
            text: SlackText::plain(text),
        }
    }
}

impl SlackView for SlackSection {
    fn slack_body(&self) -> impl SlackView {
        PrimitiveView::new(self)
    }
}

impl SlackSection {
    /// Enables slack emojis on this section if `is_enabled` is true.
    ///
    /// This has no effect on markdown text.
    pub fn emoji_enabled(self, is_enabled: bool) -> Self {
        Self {
            text: self.text.emoji_enabled(is_enabled),
            ..self
        }
    }
}

/// A context component, which shows a row of small text elements.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct SlackContext {
    #[serde(rename = "type")]
    _type: &'static str,
    elements: Vec<SlackText>,
}

impl SlackContext {
    pub fn new() -> Self {
        Self {
            _type: "context",
            elements: vec![],
        }
    }

    /// Appends a markdown element to this context.
    pub fn markdown(mut self, markdown: &str) -> Self {
        self.elements.push(SlackText::markdown(markdown));
        self
    }
}

impl SlackView for SlackContext {
    fn slack_body(&self) -> impl SlackView {
        PrimitiveView::new(self)
    }
}

/// Slack Text for use in a Section or Context.
#[derive(Debug, PartialEq, Eq)]
pub struct SlackText {
    _type: &'static str,
    text: String,
    emoji: bool,
}

impl SlackText {
    pub fn markdown(markdown: &str) -> Self {
        Self {
            _type: "mrkdwn",
            text: markdown.to_string(),
            emoji: true,
        }
    }

    pub fn plain(text: &str) -> Self {
        Self {
            _type: "plain_text",
            text: text.to_string(),
            emoji: true,
        }
    }
}

impl SlackText {
    /// Enables slack emojis on this text if `is_enabled` is true.
    ///
    /// This has no effect on markdown text.
    pub fn emoji_enabled(self, is_enabled: bool) -> Self {
        Self {
            emoji: is_enabled,
            ..self
        }
    }

    fn is_markdown(&self) -> bool {
        self._type == "mrkdwn"
    }
}

impl Serialize for SlackText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let has_emoji_field = !self.is_markdown() && !self.emoji;
        let mut state =
            serializer.serialize_struct("SlackText", if has_emoji_field { 3 } else { 2 })?;
        if has_emoji_field {
            state.serialize_field("emoji", &self.emoji)?
        }
        state.serialize_field("text", &self.text)?;
        state.serialize_field("type", &self._type)?;
        state.end()
    }
}
