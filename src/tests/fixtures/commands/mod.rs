pub mod book_appointment;
pub mod register_client;
