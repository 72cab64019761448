//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging. The workspace's main `clinic-run` binary
//! serves the same router.

use api_rest::{router, RestConfig};
use clinic_core::{storage_from_env_value, CoreConfig, RecordServices};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the clinic records REST server.
///
/// # Environment Variables
/// - `CLINIC_REST_ADDR`: server address (default: "0.0.0.0:8000")
/// - `CLINIC_DATA_DIR`: data directory; unset keeps records in memory
/// - `CLINIC_API_TOKEN`: token required on `/api/v1` routes; unset leaves them open
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the data directory is unusable,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("clinic_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_cfg = RestConfig::from_env_values(
        std::env::var("CLINIC_REST_ADDR").ok(),
        std::env::var("CLINIC_API_TOKEN").ok(),
    );
    let core_cfg = CoreConfig::new(storage_from_env_value(
        std::env::var("CLINIC_DATA_DIR").ok(),
    ))?;
    let services = RecordServices::from_config(&core_cfg)?;

    tracing::info!("-- Starting clinic records REST API on {}", rest_cfg.addr);

    let app = router(services, &rest_cfg);
    let listener = tokio::net::TcpListener::bind(&rest_cfg.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
