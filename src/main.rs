use dayflow::Application;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing; verbose diagnostics by default in development
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("dayflow=debug,tower_http=debug")
            }),
        )
        .init();

    info!("Starting DayFlow backend");

    // Construction and serving failures both funnel through the single
    // reporting path below and are swallowed there: the startup routine
    // logs the failure with its full cause chain and returns instead of
    // panicking or bubbling a distinct exit code.
    match Application::new().await {
        Ok(app) => {
            info!("Application created successfully");
            if let Err(e) = app.run().await {
                report_startup_failure(e.into());
            }
        }
        Err(e) => report_startup_failure(e.into()),
    }
}

fn report_startup_failure(error: anyhow::Error) {
    error!("Error: {error}");
    // Alternate debug formatting renders the whole cause chain
    error!("{error:?}");
}
