use api_rest::{RestConfig, router};
use clinic_core::{CoreConfig, RecordServices, StorageConfig, storage_from_env_value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the clinic records service
///
/// Serves the REST API until interrupted with Ctrl-C.
///
/// # Environment Variables
/// - `CLINIC_REST_ADDR`: REST server address (default: "0.0.0.0:8000")
/// - `CLINIC_DATA_DIR`: directory for JSON record files (unset: in-memory store)
/// - `CLINIC_API_TOKEN`: token required on `/api/v1` routes (unset: open access)
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If startup or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("clinic_core=info".parse()?)
                .add_directive("tower_http=info".parse()?),
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

    match core_cfg.storage() {
        StorageConfig::Memory => {
            tracing::warn!("CLINIC_DATA_DIR not set; records are kept in memory only")
        }
        StorageConfig::Files(dir) => tracing::info!("++ Storing records under {}", dir.display()),
    }
    let services = RecordServices::from_config(&core_cfg)?;

    tracing::info!("++ Starting clinic records REST on {}", rest_cfg.addr);

    let app = router(services, &rest_cfg);
    let listener = tokio::net::TcpListener::bind(&rest_cfg.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for Ctrl-C: {e}");
            }
        })
        .await?;

    tracing::info!("-- Clinic records REST stopped");
    Ok(())
}
