use anyhow::Result;
use pet_clinic_api::api::routes::create_routes;
use pet_clinic_api::config::database::run_migrations;
use pet_clinic_api::config::{seed_superuser, AppConfig, DatabaseConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    let pool = db_config.create_pool().await?;
    run_migrations(&pool).await?;

    seed_superuser(&pool, &config).await?;

    let app = create_routes(pool, &config.jwt_secret);

    let listener = TcpListener::bind(config.server_address()).await?;
    info!("Pet clinic server starting on http://{}", config.server_address());
    info!("Health check available at http://{}/health", config.server_address());

    axum::serve(listener, app).await?;

    Ok(())
}
