use serde::Serialize;
use serde_json::Value;

use super::slack_view::SlackView;

/// A flat array of serialized Block Kit blocks, ready to be sent to slack.
#[derive(Debug, PartialEq, Eq, Serialize, Clone)]
pub struct SlackBlocks(Vec<Value>);

impl SlackBlocks {
    /// Renders the specified view into a `SlackBlocks` instance.
    pub fn render(view: &impl SlackView) -> Self {
        let mut builder = BlocksBuilder::default();
        view.render_into(&mut builder);
        builder.finish()
    }
}

/// Collects the blocks of a view tree in the order they are rendered.
#[derive(Debug, Default)]
pub struct BlocksBuilder {
    blocks: Vec<Value>,
}

impl BlocksBuilder {
    pub(super) fn push_json(&mut self, block: Value) {
        self.blocks.push(block)
    }

    pub(super) fn append(&mut self, blocks: &SlackBlocks) {
        self.blocks.extend_from_slice(&blocks.0)
    }

    fn finish(self) -> SlackBlocks {
        SlackBlocks(self.blocks)
    }
}
