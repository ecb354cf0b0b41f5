use super::{any_view::AnySlackView, blocks::BlocksBuilder, flat_chain_view::FlatChainView};

/// A trait for implementing a slack view.
///
/// Slack views are composed of blocks that are serialized to JSON. Views are implemented using
/// the `slack_body` method, where they must return another `SlackView`.
pub trait SlackView: Sized {
    /// The content of this view.
    fn slack_body(&self) -> impl SlackView;

    /// Chains 2 slack view components as 2 separate blocks.
    ///
    /// Chains are flattened when rendered, so chaining inside the body of a chained view doesn't
    /// nest blocks.
    fn flat_chain_block<Other: SlackView + 'static>(self, other: Other) -> FlatChainView<Self, Other>
    where
        Self: 'static,
    {
        FlatChainView::new(self, other)
    }

    /// Type erases this view.
    fn erase_to_any_view(&self) -> AnySlackView {
        AnySlackView::erasing(self)
    }

    /// Appends the blocks of this view to `builder`.
    ///
    /// Views that produce blocks directly, or that combine other views, override this instead of
    /// rendering their body.
    fn render_into(&self, builder: &mut BlocksBuilder) {
        self.slack_body().render_into(builder)
    }
}
