use anyhow::Error;

use crate::{
    operations::make_ticket::MakeTicketStatus,
    plane::{client::PlaneClient, workspace::PlaneWorkspace},
};

use super::{
    command::PlaneSlackCommand,
    handler::{PlaneSlackHandler, PlaneSlackRequest},
    make_ticket_view::MakeTicketView,
    message::SlackReply,
};

/// Handles `/plane` commands by creating tickets on Plane.
pub struct TicketCommandHandler<Plane: PlaneClient> {
    plane: Plane,
    workspace: PlaneWorkspace,
}

impl<Plane: PlaneClient> TicketCommandHandler<Plane> {
    pub fn new(plane: Plane, workspace: PlaneWorkspace) -> Self {
        Self { plane, workspace }
    }
}

impl<Plane: PlaneClient + Send + Sync + 'static> PlaneSlackHandler for TicketCommandHandler<Plane> {
    async fn handle_command(
        &self,
        command: &PlaneSlackCommand,
        request: &PlaneSlackRequest,
    ) -> Result<SlackReply, Error> {
        match command {
            PlaneSlackCommand::Plane => {
                let status = MakeTicketStatus::from_making_ticket(request.text(), &self.plane).await;
                let view = MakeTicketView::new(status, &self.workspace, request.user_id());
                Ok(SlackReply::new(&view))
            }
        }
    }
}
