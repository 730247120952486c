//! Shared types.

mod response;
mod stat_card;

pub use response::{ApiResponse, Created, NoContent};
pub use stat_card::{StatCard, StatValue};
