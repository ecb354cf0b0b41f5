use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Result};
use futures::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::{select, time::{interval, sleep}};
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};

use super::{
    handler::{handle_slack_request, PlaneSlackHandler, PlaneSlackRequest},
    message::{SlackReply, SlackSendMessage},
};

const SLACK_API_URL: &str = "https://slack.com/api";

/// An envelope pushed by slack over a Socket Mode connection.
#[derive(Debug, Deserialize)]
struct SocketModeEnvelope {
    #[serde(rename = "type")]
    envelope_type: String,
    envelope_id: Option<String>,
    payload: Option<serde_json::Value>,
}

/// The acknowledgment of a `SocketModeEnvelope`.
///
/// For slash commands, the payload is used as the immediate response to the command.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct SocketModeAck {
    envelope_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<SlackReply>,
}

#[derive(Debug, PartialEq, Eq)]
enum SocketModeResponse {
    Ack(SocketModeAck),
    Reconnect,
    Nothing,
}

#[derive(Debug, Deserialize)]
struct ConnectionsOpenResponse {
    ok: bool,
    url: Option<String>,
    error: Option<String>,
}

/// Receives slash commands from slack over a Socket Mode WebSocket.
///
/// Every envelope is acknowledged as soon as it is received, and slash commands are handed off
/// to `handle_slack_request` which finishes the work in the background.
pub struct SlackSocketMode<Handler, Messenger> {
    http_client: Client,
    api_url: String,
    app_token: String,
    handler: Arc<Handler>,
    messenger: Arc<Messenger>,
    reconnect_delay: Duration,
    ping_interval: Duration,
}

impl<Handler, Messenger> SlackSocketMode<Handler, Messenger>
where
    Handler: PlaneSlackHandler + Send + Sync,
    Messenger: SlackSendMessage + Send + Sync + 'static,
{
    pub fn new(
        http_client: Client,
        app_token: &str,
        handler: Arc<Handler>,
        messenger: Arc<Messenger>,
    ) -> Self {
        Self {
            http_client,
            api_url: SLACK_API_URL.to_string(),
            app_token: app_token.to_string(),
            handler,
            messenger,
            reconnect_delay: Duration::from_secs(5),
            ping_interval: Duration::from_secs(30),
        }
    }

    /// Runs the Socket Mode connection loop.
    ///
    /// Dropped connections are reopened. This only returns if the first connection can't be
    /// opened, which usually means that the app token is invalid. Later failures to reopen a
    /// connection are retried.
    pub async fn run(&self) -> Result<()> {
        let mut url = self.open_connection().await?;
        loop {
            info!("Connecting to Slack Socket Mode.");
            match self.connect_and_run(&url).await {
                Ok(()) => info!("Socket Mode connection closed, reconnecting."),
                Err(err) => {
                    error!("Socket Mode connection error: {:?}", err);
                    sleep(self.reconnect_delay).await
                }
            }
            url = self.reopen_connection().await;
        }
    }

    async fn reopen_connection(&self) -> String {
        loop {
            match self.open_connection().await {
                Ok(url) => return url,
                Err(err) => {
                    warn!("Failed to reopen a Socket Mode connection: {:?}", err);
                    sleep(self.reconnect_delay).await
                }
            }
        }
    }

    async fn open_connection(&self) -> Result<String> {
        let response = self
            .http_client
            .post(format!("{}/apps.connections.open", self.api_url))
            .bearer_auth(&self.app_token)
            .send()
            .await?
            .json::<ConnectionsOpenResponse>()
            .await?;
        match (response.ok, response.url) {
            (true, Some(url)) => Ok(url),
            _ => Err(anyhow!(
                "apps.connections.open failed: {}",
                response.error.unwrap_or_else(|| "missing url".to_string())
            )),
        }
    }

    async fn connect_and_run(&self, url: &str) -> Result<()> {
        let (ws_stream, _) = connect_async(url).await?;
        let (mut write, mut read) = ws_stream.split();
        let mut ping = interval(self.ping_interval);
        ping.tick().await;
        loop {
            select! {
                _ = ping.tick() => write.send(WsMessage::Ping(vec![])).await?,
                message = read.next() => match message {
                    Some(Ok(WsMessage::Text(text))) => match self.response_to(&text).await {
                        SocketModeResponse::Ack(ack) => {
                            write.send(WsMessage::Text(serde_json::to_string(&ack)?)).await?
                        }
                        SocketModeResponse::Reconnect => return Ok(()),
                        SocketModeResponse::Nothing => {}
                    },
                    Some(Ok(WsMessage::Ping(data))) => write.send(WsMessage::Pong(data)).await?,
                    Some(Ok(WsMessage::Close(_))) | None => return Ok(()),
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err.into()),
                }
            }
        }
    }

    async fn response_to(&self, text: &str) -> SocketModeResponse {
        let envelope = match serde_json::from_str::<SocketModeEnvelope>(text) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!("Failed to parse Socket Mode envelope: {}", err);
                return SocketModeResponse::Nothing;
            }
        };
        match envelope.envelope_type.as_str() {
            "hello" => {
                info!("Socket Mode connection established.");
                return SocketModeResponse::Nothing;
            }
            "disconnect" => {
                info!("Slack requested a Socket Mode reconnect.");
                return SocketModeResponse::Reconnect;
            }
            _ => {}
        }
        let Some(envelope_id) = envelope.envelope_id else {
            debug!("Ignoring {} envelope without an id.", envelope.envelope_type);
            return SocketModeResponse::Nothing;
        };
        let payload = match (envelope.envelope_type.as_str(), envelope.payload) {
            ("slash_commands", Some(payload)) => self.reply_to_slash_command(payload).await,
            (envelope_type, _) => {
                debug!("Acknowledging unhandled {} envelope.", envelope_type);
                None
            }
        };
        SocketModeResponse::Ack(SocketModeAck { envelope_id, payload })
    }

    async fn reply_to_slash_command(&self, payload: serde_json::Value) -> Option<SlackReply> {
        match serde_json::from_value::<PlaneSlackRequest>(payload) {
            Ok(request) => Some(
                handle_slack_request(self.handler.clone(), request, self.messenger.clone()).await,
            ),
            Err(err) => {
                warn!("Ignoring unsupported slash command: {}", err);
                None
            }
        }
    }
}
