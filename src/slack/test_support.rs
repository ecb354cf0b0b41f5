use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;

use super::message::{SlackMessage, SlackSendMessage};

/// A `SlackSendMessage` that records every message instead of sending it.
#[derive(Clone)]
pub struct TestSlackMessenger {
    messages: Arc<Mutex<Vec<SlackMessage>>>,
}

impl TestSlackMessenger {
    pub fn new() -> Self {
        Self { messages: Arc::new(Mutex::new(vec![])) }
    }

    pub async fn messages(&self) -> Vec<SlackMessage> {
        self.messages.lock().await.clone()
    }
}

impl SlackSendMessage for TestSlackMessenger {
    async fn send(&self, message: &SlackMessage) -> Result<()> {
        self.messages.lock().await.push(message.clone());
        Ok(())
    }
}
