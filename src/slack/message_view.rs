use crate::utils::env::PlaneBotEnvironment;

use super::ui_lib::{block_kit_views::SlackSection, slack_view::SlackView};

const DEV_BANNER: &str = "_This message was sent for development purposes. Please ignore!_";

/// The outermost view of every message sent by this tool.
///
/// Prefixes `base` with a banner when running in the dev environment.
pub struct MessageView<'v, Base: SlackView> {
    base: &'v Base,
    environment: PlaneBotEnvironment,
}

impl<'v, Base: SlackView> MessageView<'v, Base> {
    pub fn new(base: &'v Base) -> Self {
        Self { base, environment: PlaneBotEnvironment::current() }
    }
}

impl<'v, Base: SlackView> SlackView for MessageView<'v, Base> {
    fn slack_body(&self) -> impl SlackView {
        let is_dev = self.environment == PlaneBotEnvironment::Dev;
        is_dev
            .then(|| SlackSection::from_markdown(DEV_BANNER))
            .flat_chain_block(self.base.erase_to_any_view())
    }
}
