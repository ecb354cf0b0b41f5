use log::warn;
use serde::Serialize;
use serde_json::Value;

use super::{blocks::BlocksBuilder, slack_view::SlackView};

/// A single Block Kit block, serialized as soon as the view is built.
///
/// A block that fails to serialize is left out of the message.
pub(super) struct PrimitiveView(Option<Value>);

impl PrimitiveView {
    pub(super) fn new(block: &impl Serialize) -> Self {
        match serde_json::to_value(block) {
            Ok(json) => Self(Some(json)),
            Err(err) => {
                warn!("Dropping a slack block that failed to serialize: {}", err);
                Self(None)
            }
        }
    }
}

impl SlackView for PrimitiveView {
    fn slack_body(&self) -> impl SlackView {
        EmptySlackView
    }

    fn render_into(&self, builder: &mut BlocksBuilder) {
        if let Some(block) = &self.0 {
            builder.push_json(block.clone())
        }
    }
}

/// A view without any blocks.
///
/// Composite views return this from `slack_body`, since they render their parts directly.
pub struct EmptySlackView;

impl SlackView for EmptySlackView {
    fn slack_body(&self) -> impl SlackView {
        EmptySlackView
    }

    fn render_into(&self, _: &mut BlocksBuilder) {}
}
