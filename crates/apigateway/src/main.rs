use anyhow::{Context, Result};
use apigateway::{
    config::Config, di::DependenciesInjectDeps, handler::AppRouter, state::AppState,
};
use dotenv::dotenv;
use shared::{
    config::ConnectionManager,
    utils::{Telemetry, init_logger},
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = match &config.otel_endpoint {
        Some(endpoint) => Some(
            Telemetry::init("apigateway", endpoint).context("Failed to initialize telemetry")?,
        ),
        None => None,
    };

    let _log_guard = init_logger(
        telemetry.as_ref().map(Telemetry::logger_provider),
        "apigateway",
        config.is_dev,
        config.enable_file_log,
    );

    let pool = ConnectionManager::new_pool(
        &config.database.url,
        config.database.min_connections,
        config.database.max_connections,
        config.database.acquire_timeout,
    )
    .await
    .context("Failed to connect to database")?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;
        info!("✅ Database migrations applied");
    }

    let queue = config
        .queue
        .connect()
        .await
        .context("Failed to set up message queue")?;

    let deps = DependenciesInjectDeps::postgres(pool.clone(), queue, config.publish_timeout);
    let state = AppState::new(deps, config.request_timeout);

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down...");
    pool.close().await;

    if let Some(telemetry) = telemetry {
        if let Err(e) = telemetry.shutdown() {
            warn!("⚠️ {e:#}");
        }
    }

    Ok(())
}
