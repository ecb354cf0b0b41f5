use anyhow::Result;
use log::{error, info};

use crate::plane::{
    client::PlaneClient,
    models::{NewPlaneIssue, NewPlaneLabel, PlaneIssue, PlaneLabel, PlaneProject},
};

/// The only action supported by the `/plane` command.
///
/// `maketkt` without a board name is an invalid action, since there is no board to look up.
pub const MAKE_TICKET_ACTION: &str = "maketkt";

/// The arguments of a `/plane maketkt <board name> <ticket name...>` invocation.
#[derive(Debug, PartialEq, Eq)]
pub struct MakeTicketArguments<'a> {
    board_name: &'a str,
    ticket_name: String,
}

impl<'a> MakeTicketArguments<'a> {
    /// Parses the text of a `/plane` command.
    ///
    /// The first whitespace separated word must be `maketkt`, and the second is the board name.
    /// Everything after the board name is joined with single spaces to form the ticket name.
    /// Returns `None` if the action is not `maketkt` or if there is no board name.
    pub fn parse(command_text: &'a str) -> Option<Self> {
        let mut words = command_text.split_whitespace();
        if words.next() != Some(MAKE_TICKET_ACTION) {
            return None;
        }
        let board_name = words.next()?;
        Some(Self { board_name, ticket_name: words.collect::<Vec<&str>>().join(" ") })
    }

    pub fn board_name(&self) -> &str {
        self.board_name
    }

    pub fn ticket_name(&self) -> &str {
        &self.ticket_name
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MakeTicketStatus {
    Success {
        board: PlaneProject,
        issue: PlaneIssue,
        ticket_name: String,
    },
    InvalidAction,
    BoardNotFound(String),
    EmptyTicketName,
    FailedToCreateTicket,
    PlaneUnavailable,
}

impl MakeTicketStatus {
    /// Creates a ticket on Plane from the text of a `/plane` command.
    ///
    /// The board is resolved by exact name, the "via Slack" label is looked up on the board (and
    /// created if missing), and finally the issue is created with that label. The first step
    /// that fails determines the returned status, and no calls are made after it. A label
    /// created before a failed issue creation is left in place.
    pub async fn from_making_ticket(command_text: &str, plane: &impl PlaneClient) -> Self {
        let Some(arguments) = MakeTicketArguments::parse(command_text) else {
            return Self::InvalidAction;
        };
        match Self::make_ticket(&arguments, plane).await {
            Ok(status) => status,
            Err(err) => {
                error!(
                    "Failed to reach Plane while making a ticket on board \"{}\": {:?}",
                    arguments.board_name(),
                    err
                );
                Self::PlaneUnavailable
            }
        }
    }

    async fn make_ticket(
        arguments: &MakeTicketArguments<'_>,
        plane: &impl PlaneClient,
    ) -> Result<Self> {
        let Some(board) = Self::resolve_board(arguments.board_name(), plane).await? else {
            return Ok(Self::BoardNotFound(arguments.board_name().to_string()));
        };
        let label = Self::resolve_via_slack_label(&board, plane).await?;
        if arguments.ticket_name().trim().is_empty() {
            return Ok(Self::EmptyTicketName);
        }
        let issue = NewPlaneIssue::new(arguments.ticket_name(), vec![label.id().clone()]);
        match plane.create_issue(board.id(), &issue).await {
            Ok(issue) => {
                info!("Created ticket {} on board \"{}\".", issue.id(), board.name());
                Ok(Self::Success { board, issue, ticket_name: arguments.ticket_name().to_string() })
            }
            Err(err) => {
                error!("Failed to create ticket on board \"{}\": {:?}", board.name(), err);
                Ok(Self::FailedToCreateTicket)
            }
        }
    }

    async fn resolve_board(
        board_name: &str,
        plane: &impl PlaneClient,
    ) -> Result<Option<PlaneProject>> {
        let projects = plane.projects().await?;
        Ok(projects.into_iter().find(|project| project.name() == board_name))
    }

    async fn resolve_via_slack_label(
        board: &PlaneProject,
        plane: &impl PlaneClient,
    ) -> Result<PlaneLabel> {
        let labels = plane.labels(board.id()).await?;
        if let Some(label) = labels.into_iter().find(|label| label.is_via_slack()) {
            return Ok(label);
        }
        info!("Creating the via Slack label on board \"{}\".", board.name());
        plane.create_label(board.id(), &NewPlaneLabel::via_slack()).await
    }
}
