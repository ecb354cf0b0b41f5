use super::{
    blocks::{BlocksBuilder, SlackBlocks},
    primitive_view::EmptySlackView,
    slack_view::SlackView,
};

/// A type-erased view.
///
/// The erased view is rendered eagerly, so erasing is useful when different branches of a
/// `slack_body` need to return different view types.
pub struct AnySlackView {
    blocks: SlackBlocks,
}

impl AnySlackView {
    /// Erases a reference to the specified view.
    pub fn erasing(view: &impl SlackView) -> Self {
        Self { blocks: SlackBlocks::render(view) }
    }
}

impl SlackView for AnySlackView {
    fn slack_body(&self) -> impl SlackView {
        EmptySlackView
    }

    fn render_into(&self, builder: &mut BlocksBuilder) {
        builder.append(&self.blocks)
    }
}
