pub mod make_ticket;
