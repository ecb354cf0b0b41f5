use std::{
    error::Error,
    fmt::{Display, Formatter},
    future::Future,
};

use anyhow::Result;
use log::error;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::{Deserialize, Serialize};

use super::{
    handler::PlaneSlackRequest,
    message_view::MessageView,
    ui_lib::{blocks::SlackBlocks, slack_view::SlackView},
};

const CHAT_POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

/// Who can see a reply to a slash command.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlackResponseType {
    /// Only the user who invoked the command.
    Ephemeral,
    /// Everyone in the channel the command was invoked in.
    InChannel,
}

/// A `SlackView` that can be sent as a reply to a slash command.
pub trait SlackReplyView: SlackView {
    fn response_type(&self) -> SlackResponseType;

    /// The plain text shown in notifications, and by clients that can't render blocks.
    fn fallback_text(&self) -> String;
}

/// A rendered reply to a slash command.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct SlackReply {
    response_type: SlackResponseType,
    text: String,
    blocks: SlackBlocks,
}

impl SlackReply {
    pub fn new(view: &impl SlackReplyView) -> Self {
        Self {
            response_type: view.response_type(),
            text: view.fallback_text(),
            blocks: SlackBlocks::render(&MessageView::new(view)),
        }
    }

    pub fn response_type(&self) -> SlackResponseType {
        self.response_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Where a `SlackMessage` is delivered.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SlackMessageDestination {
    /// Posted to a channel with `chat.postMessage` as the bot.
    Channel(String),
    /// Posted to the `response_url` of a slash command.
    ResponseUrl(String),
}

/// A slack message.
///
/// In channel replies are posted to the channel the command was invoked in, and ephemeral
/// replies go through the response url of the command so that only the invoking user sees them.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SlackMessage {
    destination: SlackMessageDestination,
    reply: SlackReply,
}

impl SlackMessage {
    pub fn new(request: &PlaneSlackRequest, reply: SlackReply) -> Self {
        let destination = match reply.response_type() {
            SlackResponseType::InChannel => {
                SlackMessageDestination::Channel(request.channel_id().to_string())
            }
            SlackResponseType::Ephemeral => {
                SlackMessageDestination::ResponseUrl(request.response_url().to_string())
            }
        };
        Self { destination, reply }
    }

    pub fn destination(&self) -> &SlackMessageDestination {
        &self.destination
    }

    pub fn reply(&self) -> &SlackReply {
        &self.reply
    }
}

#[derive(Debug, Serialize)]
struct ChatPostMessageBody<'m> {
    channel: &'m str,
    #[serde(flatten)]
    reply: &'m SlackReply,
}

/// A trait for sending a slack message.
pub trait SlackSendMessage {
    fn send(&self, message: &SlackMessage) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug, Deserialize)]
struct SlackResponse {
    error: Option<String>,
}

#[derive(Debug)]
struct SlackMessageSendingError {
    message: String,
}

impl Display for SlackMessageSendingError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Slack Message Sending Error: {}", self.message)
    }
}

impl Error for SlackMessageSendingError {}

/// Sends slack messages over the Web API as the bot user.
#[derive(Clone)]
pub struct SlackMessenger {
    http_client: Client,
    bot_token: String,
}

impl SlackMessenger {
    pub fn new(http_client: Client, bot_token: &str) -> Self {
        Self { http_client, bot_token: bot_token.to_string() }
    }
}

impl SlackMessenger {
    async fn post_to_channel(&self, channel_id: &str, reply: &SlackReply) -> Result<()> {
        let resp = self
            .http_client
            .post(CHAT_POST_MESSAGE_URL)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.bot_token)
            .json(&ChatPostMessageBody { channel: channel_id, reply })
            .send()
            .await?;
        let slack_resp = resp.json::<SlackResponse>().await?;
        match slack_resp.error {
            Some(error) => Err(Self::sending_error(error)),
            None => Ok(()),
        }
    }

    async fn post_to_response_url(&self, response_url: &str, reply: &SlackReply) -> Result<()> {
        let resp = self
            .http_client
            .post(response_url)
            .header(CONTENT_TYPE, "application/json")
            .json(reply)
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            Err(Self::sending_error(format!("{} {}", status, body)))
        }
    }

    fn sending_error(message: String) -> anyhow::Error {
        error!("A Slack API error occured {}.", message);
        anyhow::Error::new(SlackMessageSendingError { message })
    }
}

impl SlackSendMessage for SlackMessenger {
    async fn send(&self, message: &SlackMessage) -> Result<()> {
        match message.destination() {
            SlackMessageDestination::Channel(channel_id) => {
                self.post_to_channel(channel_id, message.reply()).await
            }
            SlackMessageDestination::ResponseUrl(response_url) => {
                self.post_to_response_url(response_url, message.reply()).await
            }
        }
    }
}
