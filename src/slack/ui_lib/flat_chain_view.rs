use super::{blocks::BlocksBuilder, primitive_view::EmptySlackView, slack_view::SlackView};

/// Two views rendered one after the other at the same level.
#[derive(Debug, PartialEq, Eq)]
pub struct FlatChainView<First: SlackView, Second: SlackView> {
    first: First,
    second: Second,
}

impl<First: SlackView, Second: SlackView> FlatChainView<First, Second> {
    pub(super) fn new(first: First, second: Second) -> Self {
        Self { first, second }
    }
}

impl<First: SlackView, Second: SlackView> SlackView for FlatChainView<First, Second> {
    fn slack_body(&self) -> impl SlackView {
        EmptySlackView
    }

    fn render_into(&self, builder: &mut BlocksBuilder) {
        self.first.render_into(builder);
        self.second.render_into(builder)
    }
}
