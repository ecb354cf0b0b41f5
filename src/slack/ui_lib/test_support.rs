use super::{blocks::SlackBlocks, slack_view::SlackView};

/// Asserts the json rendered by a slack view.
///
/// Key order is ignored, so the expected json can be copied straight from the Block Kit Builder.
pub fn assert_blocks_json(view: &impl SlackView, json: &str) {
    let blocks = serde_json::to_value(SlackBlocks::render(view)).unwrap();
    let expected_blocks = serde_json::from_str::<serde_json::Value>(json).unwrap();
    assert_eq!(blocks, expected_blocks)
}
