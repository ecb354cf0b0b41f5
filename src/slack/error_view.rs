use super::{
    message::{SlackReplyView, SlackResponseType},
    ui_lib::{block_kit_views::SlackSection, slack_view::SlackView},
};

/// An ephemeral plain text error shown only to the user who ran the command.
pub struct ErrorView {
    message: String,
}

impl ErrorView {
    pub fn new(message: &str) -> Self {
        Self { message: message.to_string() }
    }

    /// The view shown when handling a command fails unexpectedly.
    pub fn unexpected(error: &anyhow::Error) -> Self {
        Self::new(&format!("ERROR. Something went wrong: {}", error))
    }
}

impl SlackView for ErrorView {
    fn slack_body(&self) -> impl SlackView {
        SlackSection::from_plaintext(&self.message).emoji_enabled(false)
    }
}

impl SlackReplyView for ErrorView {
    fn response_type(&self) -> SlackResponseType {
        SlackResponseType::Ephemeral
    }

    fn fallback_text(&self) -> String {
        self.message.clone()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use crate::slack::ui_lib::test_support::assert_blocks_json;

    use super::*;

    #[test]
    fn blocks() {
        assert_blocks_json(
            &ErrorView::new("ERROR. Please enter a name for the ticket"),
            r#"[{"text":{"emoji":false,"text":"ERROR. Please enter a name for the ticket","type":"plain_text"},"type":"section"}]"#,
        )
    }

    #[test]
    fn unexpected_includes_error() {
        let view = ErrorView::unexpected(&anyhow!("connection reset"));
        assert_eq!(view.fallback_text(), "ERROR. Something went wrong: connection reset")
    }
}
