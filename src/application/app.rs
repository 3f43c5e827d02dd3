use crate::api::{self, AppState};
use crate::config::Settings;
use crate::infrastructure::Database;
use crate::Result;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Main application struct that coordinates all components
pub struct Application {
    settings: Settings,
    database: Database,
}

impl Application {
    /// The application factory: load configuration, connect the
    /// database, and run pending migrations. Any failure here aborts
    /// startup before a listener is bound.
    #[instrument]
    pub async fn new() -> Result<Self> {
        let settings = Settings::new()?;
        let database = Database::connect(&settings).await?;
        database.run_migrations().await?;

        Ok(Self { settings, database })
    }

    /// Bind the configured address and serve until the process ends.
    /// Blocks the calling task for the lifetime of the server.
    #[instrument(skip(self))]
    pub async fn run(self) -> Result<()> {
        let address = self.settings.bind_address();
        let listener = Self::bind(&address).await?;

        info!(
            "DayFlow backend listening on {} ({} environment)",
            address, self.settings.application.environment
        );

        let state = AppState::new(self.database.pool().clone(), self.settings);
        let router = api::router(state);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;

        Ok(())
    }

    /// Bind failures (port already taken, bad address) surface as
    /// ordinary errors for the caller's catch-all path
    async fn bind(address: &str) -> Result<TcpListener> {
        Ok(TcpListener::bind(address).await?)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[tokio::test]
    async fn test_bind_succeeds_on_free_port() {
        let listener = Application::bind("127.0.0.1:0").await.unwrap();
        assert!(listener.local_addr().unwrap().port() > 0);
    }

    #[tokio::test]
    async fn test_bind_conflict_is_an_error_not_a_panic() {
        let first = Application::bind("127.0.0.1:0").await.unwrap();
        let addr = first.local_addr().unwrap();

        let second = Application::bind(&addr.to_string()).await;
        assert!(matches!(second, Err(Error::Io(_))));
    }

    #[tokio::test]
    #[ignore = "requires database connection"]
    async fn test_application_can_be_created() {
        let app = Application::new()
            .await
            .expect("Failed to create application");
        assert!(app.settings().application.port > 0);
    }
}
