pub mod appointments;
pub mod barbers;
pub mod clients;
pub mod commands;
pub mod notifications;
