use std::{
    env,
    fmt::{Debug, Formatter},
    sync::Arc,
};

use crate::{
    plane::{
        client::PlaneHttpClient,
        workspace::{PlaneWorkspace, DEFAULT_PLANE_BASE_URL, DEFAULT_PLANE_WORKSPACE},
    },
    slack::{
        message::SlackMessenger, socket_mode::SlackSocketMode,
        ticket_command_handler::TicketCommandHandler,
    },
    utils::env::PlaneBotEnvironment,
};
use anyhow::{anyhow, Context, Result};
use log::info;
use reqwest::Client;

use super::signature::SlackSigningSecret;

const DEFAULT_PORT: u16 = 2000;

pub type PlaneTicketHandler = TicketCommandHandler<PlaneHttpClient>;

/// A data type containing necessary structs for server operations.
///
/// Every value is read from the environment once at startup.
pub struct ServerEnvironment {
    environment: PlaneBotEnvironment,
    http_client: Client,
    workspace: PlaneWorkspace,
    ticket_handler: Arc<PlaneTicketHandler>,
    slack_messenger: Arc<SlackMessenger>,
    signing_secret: SlackSigningSecret,
    app_token: String,
    address: String,
}

impl Debug for ServerEnvironment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerEnvironment")
            .field("environment", &self.environment)
            .field("workspace", &self.workspace)
            .field("address", &self.address)
            .field("secrets", &"[REDACTED]")
            .finish()
    }
}

impl ServerEnvironment {
    /// Returns the current environment.
    ///
    /// If the PLANE_ENV environment variable is "dev", then the development environment is used.
    /// Otherwise, the production environment is used.
    pub fn current() -> Result<Self> {
        let environment = PlaneBotEnvironment::current();
        match environment {
            PlaneBotEnvironment::Dev => info!("Using dev ServerEnvironment."),
            PlaneBotEnvironment::Prod => info!("Using production ServerEnvironment."),
        }
        Self::from_vars(environment, |name| env::var(name).ok())
    }

    fn from_vars(
        environment: PlaneBotEnvironment,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let required = |name: &str| {
            var(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| anyhow!("Make sure to set {} in the .env.", name))
        };
        let bot_token = required("SLACK_BOT_TOKEN")?;
        let signing_secret = required("SLACK_SIGNING_SECRET")?;
        let app_token = required("SLACK_APP_TOKEN")?;
        let api_key = required("PLANE_API_TOKEN")?;
        let port = match var("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {}.", port))?,
            None => DEFAULT_PORT,
        };
        let host = match environment {
            PlaneBotEnvironment::Dev => "127.0.0.1",
            PlaneBotEnvironment::Prod => "0.0.0.0",
        };
        let workspace = PlaneWorkspace::new(
            &var("PLANE_BASE_URL").unwrap_or_else(|| DEFAULT_PLANE_BASE_URL.to_string()),
            &var("PLANE_WORKSPACE").unwrap_or_else(|| DEFAULT_PLANE_WORKSPACE.to_string()),
        );
        let http_client = Client::new();
        let plane = PlaneHttpClient::new(http_client.clone(), workspace.clone(), &api_key);
        Ok(Self {
            environment,
            http_client: http_client.clone(),
            ticket_handler: Arc::new(TicketCommandHandler::new(plane, workspace.clone())),
            workspace,
            slack_messenger: Arc::new(SlackMessenger::new(http_client, &bot_token)),
            signing_secret: SlackSigningSecret::new(&signing_secret),
            app_token,
            address: format!("{}:{}", host, port),
        })
    }
}

impl ServerEnvironment {
    pub fn ticket_handler(&self) -> Arc<PlaneTicketHandler> {
        self.ticket_handler.clone()
    }

    pub fn slack_messenger(&self) -> Arc<SlackMessenger> {
        self.slack_messenger.clone()
    }

    pub fn signing_secret(&self) -> &SlackSigningSecret {
        &self.signing_secret
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// The Socket Mode connection that delivers slash commands to the ticket handler.
    pub fn socket_mode(&self) -> SlackSocketMode<PlaneTicketHandler, SlackMessenger> {
        SlackSocketMode::new(
            self.http_client.clone(),
            &self.app_token,
            self.ticket_handler(),
            self.slack_messenger(),
        )
    }
}
