use super::{
    message::{SlackReplyView, SlackResponseType},
    ui_lib::{block_kit_views::SlackSection, slack_view::SlackView},
};

const PENDING_TEXT: &str = "⏳ Creating your ticket on Plane...";

/// The acknowledgment sent while a command is handled in the background.
pub struct PendingView;

impl SlackView for PendingView {
    fn slack_body(&self) -> impl SlackView {
        SlackSection::from_markdown(PENDING_TEXT)
    }
}

impl SlackReplyView for PendingView {
    fn response_type(&self) -> SlackResponseType {
        SlackResponseType::Ephemeral
    }

    fn fallback_text(&self) -> String {
        PENDING_TEXT.to_string()
    }
}
