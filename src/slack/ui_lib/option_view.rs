use super::{blocks::BlocksBuilder, primitive_view::EmptySlackView, slack_view::SlackView};

/// `None` renders no blocks.
impl<View: SlackView> SlackView for Option<View> {
    fn slack_body(&self) -> impl SlackView {
        EmptySlackView
    }

    fn render_into(&self, builder: &mut BlocksBuilder) {
        if let Some(view) = self {
            view.render_into(builder)
        }
    }
}
