pub mod any_view;
pub mod block_kit_views;
pub mod blocks;
pub mod flat_chain_view;
pub mod option_view;
pub mod primitive_view;
pub mod slack_view;
#[cfg(test)]
pub mod test_support;
