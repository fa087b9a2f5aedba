use anyhow::Result;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::services::UserService;

/// Create the bootstrap superuser account if it does not exist yet.
pub async fn seed_superuser(pool: &PgPool, config: &AppConfig) -> Result<()> {
    let user_service = UserService::new(pool.clone());

    if user_service
        .find_by_email(&config.first_superuser_email)
        .await?
        .is_some()
    {
        tracing::info!("Superuser already exists in database");
        return Ok(());
    }

    user_service
        .register(
            &config.first_superuser_email,
            &config.first_superuser_password,
        )
        .await?;
    tracing::info!("Superuser was created");

    Ok(())
}
