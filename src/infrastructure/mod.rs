//! Infrastructure layer for DayFlow
//!
//! Database access and the repository implementations behind the API
//! handlers.

pub mod database;
pub mod repositories;

pub use database::Database;
