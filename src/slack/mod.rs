pub mod command;
pub mod error_view;
pub mod handler;
pub mod make_ticket_view;
pub mod message;
pub mod message_view;
pub mod pending_view;
pub mod socket_mode;
#[cfg(test)]
pub mod test_support;
pub mod ticket_command_handler;
pub mod ui_lib;
