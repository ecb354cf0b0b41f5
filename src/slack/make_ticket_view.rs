use crate::{
    operations::make_ticket::MakeTicketStatus,
    plane::{models::VIA_SLACK_LABEL_NAME, workspace::PlaneWorkspace},
};

use super::{
    error_view::ErrorView,
    message::{SlackReplyView, SlackResponseType},
    ui_lib::{
        block_kit_views::{SlackContext, SlackSection},
        slack_view::SlackView,
    },
};

const INVALID_ACTION_TEXT: &str =
    "ERROR. Invalid action. To make a ticket, use /plane maketkt [board name] [ticket name].";
const EMPTY_TICKET_NAME_TEXT: &str = "ERROR. Please enter a name for the ticket";
const FAILED_TO_CREATE_TICKET_TEXT: &str =
    "ERROR. Failed to create ticket. Please check the input values.";
const PLANE_UNAVAILABLE_TEXT: &str = "ERROR. Could not reach Plane. Please try again later.";

/// The reply to a `/plane maketkt` command.
pub struct MakeTicketView<'v> {
    status: MakeTicketStatus,
    workspace: &'v PlaneWorkspace,
    assignee_user_id: &'v str,
}

impl<'v> MakeTicketView<'v> {
    pub fn new(
        status: MakeTicketStatus,
        workspace: &'v PlaneWorkspace,
        assignee_user_id: &'v str,
    ) -> Self {
        Self { status, workspace, assignee_user_id }
    }
}

impl<'v> SlackView for MakeTicketView<'v> {
    fn slack_body(&self) -> impl SlackView {
        match &self.status {
            MakeTicketStatus::Success { board, issue, ticket_name } => {
                let issue_link = self.workspace.issue_link(board.id(), issue.id());
                let board_link = self.workspace.board_link(board.id());
                SlackSection::from_markdown(&format!(
                    "The ticket *<{}|{}>* has been successfully created.",
                    issue_link, ticket_name
                ))
                .flat_chain_block(
                    SlackContext::new()
                        .markdown(&format!("*Board:* <{}|{}>", board_link, board.name()))
                        .markdown("*Status:* In Progress")
                        .markdown(&format!("*Assignee:* <@{}>", self.assignee_user_id))
                        .markdown(&format!("*Priority:* {}", issue.priority())),
                )
                .flat_chain_block(SlackContext::new().markdown(&format!(
                    "Label *{}* has been added to the ticket.",
                    VIA_SLACK_LABEL_NAME
                )))
                .erase_to_any_view()
            }
            _ => ErrorView::new(&self.fallback_text()).erase_to_any_view(),
        }
    }
}

impl<'v> SlackReplyView for MakeTicketView<'v> {
    fn response_type(&self) -> SlackResponseType {
        match self.status {
            MakeTicketStatus::Success { .. } => SlackResponseType::InChannel,
            _ => SlackResponseType::Ephemeral,
        }
    }

    fn fallback_text(&self) -> String {
        match &self.status {
            MakeTicketStatus::Success { ticket_name, .. } => {
                format!("The ticket {} has been successfully created.", ticket_name)
            }
            MakeTicketStatus::InvalidAction => INVALID_ACTION_TEXT.to_string(),
            MakeTicketStatus::BoardNotFound(board_name) => {
                format!("ERROR. Board named \"{}\" not found", board_name)
            }
            MakeTicketStatus::EmptyTicketName => EMPTY_TICKET_NAME_TEXT.to_string(),
            MakeTicketStatus::FailedToCreateTicket => FAILED_TO_CREATE_TICKET_TEXT.to_string(),
            MakeTicketStatus::PlaneUnavailable => PLANE_UNAVAILABLE_TEXT.to_string(),
        }
    }
}
