pub mod auth;
pub mod deliveries;
pub mod users;
