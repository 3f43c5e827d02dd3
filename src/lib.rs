//! DayFlow - HR backend for daily work logs, skill development, and mood tracking
//!
//! The service exposes a JSON HTTP API with JWT authentication and
//! role-based access control: HR and managers see every employee's
//! records, employees see only their own.

pub mod api;
pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::Application;
pub use error::{Error, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_functionality() {
        // Basic smoke test to ensure the library compiles and basic types work
        let result: Result<()> = Ok(());
        assert!(result.is_ok());
    }
}
