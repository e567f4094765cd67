use anyhow::Context;
use codeforge_migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::env;
use tracing::info;

/// Connects to the database named by `DATABASE_URL` and brings the schema
/// up to date before anything else touches it.
pub async fn init_pool_and_migrate() -> anyhow::Result<DatabaseConnection> {
    let database_url =
        env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL is not set"))?;

    let db = Database::connect(&database_url)
        .await
        .context("failed to connect to the database")?;

    let pending = Migrator::get_pending_migrations(&db).await?.len();
    if pending > 0 {
        info!(pending, "applying pending migrations");
    }
    Migrator::up(&db, None).await.context("migration failed")?;

    Ok(db)
}
