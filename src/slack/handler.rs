use std::{future::Future, sync::Arc};

use super::{
    command::PlaneSlackCommand,
    error_view::ErrorView,
    message::{SlackMessage, SlackReply, SlackSendMessage},
    pending_view::PendingView,
};
use anyhow::Error;
use log::error;
use serde::{Deserialize, Serialize};
use tokio::spawn;

/// A slash command request from slack.
///
/// Slack sends many more fields than these, the rest are ignored.
#[derive(Debug, PartialEq, Eq, Deserialize, Serialize, Clone)]
pub struct PlaneSlackRequest {
    channel_id: String,
    user_id: String,
    text: String,
    command: PlaneSlackCommand,
    response_url: String,
}

impl PlaneSlackRequest {
    pub fn new(
        channel_id: String,
        user_id: String,
        text: String,
        command: PlaneSlackCommand,
        response_url: String,
    ) -> Self {
        Self {
            channel_id,
            user_id,
            text,
            command,
            response_url,
        }
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn response_url(&self) -> &str {
        &self.response_url
    }
}

/// A trait for handling slack commands.
pub trait PlaneSlackHandler: Sized + 'static {
    /// Handles the specified command, and returns the reply to send back to slack.
    fn handle_command(
        &self,
        command: &PlaneSlackCommand,
        request: &PlaneSlackRequest,
    ) -> impl Future<Output = Result<SlackReply, Error>> + Send;
}

/// Handles a `PlaneSlackRequest` and returns the acknowledgment to respond to slack with.
///
/// Slack requires an acknowledgment within 3 seconds, so the function immediately returns a
/// pending reply. The command is handled on a background task, and its reply is sent to slack
/// via `messenger` when the handling of the request is finished.
pub async fn handle_slack_request(
    handler: Arc<impl PlaneSlackHandler + Send + Sync>,
    request: PlaneSlackRequest,
    messenger: Arc<impl SlackSendMessage + Send + Sync + 'static>,
) -> SlackReply {
    // NB: The background task is unstructured since the acknowledgment must go out before the
    // slow calls to Plane finish.
    spawn(async move {
        let reply = reply_for_request(handler.as_ref(), &request).await;
        let message = SlackMessage::new(&request, reply);
        if let Err(err) = messenger.send(&message).await {
            error!("Failed to deliver the reply to {}: {:?}", request.channel_id(), err)
        }
    });
    SlackReply::new(&PendingView)
}

async fn reply_for_request(
    handler: &impl PlaneSlackHandler,
    request: &PlaneSlackRequest,
) -> SlackReply {
    match handler.handle_command(&request.command, request).await {
        Ok(reply) => reply,
        Err(err) => {
            error!("Failed to handle {:?}: {:?}", request.command, err);
            SlackReply::new(&ErrorView::unexpected(&err))
        }
    }
}
