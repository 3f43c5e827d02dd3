//! Application assembly and lifecycle
//!
//! [`Application::new`] is the factory: it loads configuration and
//! connects the database. [`Application::run`] binds the listener and
//! serves until the process ends.

pub mod app;

pub use app::Application;
