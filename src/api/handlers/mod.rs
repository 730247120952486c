//! HTTP request handlers.

pub mod auth_handler;
pub mod employee_handler;

pub use auth_handler::{account_routes, auth_routes};
pub use employee_handler::employee_routes;
