//! Database initialization command

use anyhow::{Context as _, Result};
use kalma_core::{ConnectionMode, LibsqlStorage};
use tracing::debug;

use super::helpers::Context;

/// Handle database initialization command
///
/// The database location comes from the usual chain: `--db-path`,
/// `KALMA_DB_PATH`, the config file, then the platform data directory.
pub async fn handle(ctx: &Context) -> Result<()> {
    let db_path = ctx.db_path.to_string_lossy().to_string();
    debug!("Initializing database at {}", db_path);

    // Creates the file if needed and applies pending migrations
    let storage =
        LibsqlStorage::new_with_validation(ConnectionMode::Local(db_path.clone()), true)
            .await
            .with_context(|| format!("Failed to initialize database at {}", db_path))?;
    let applied = storage.applied_migrations().await?;

    println!("✓ Database initialized: {}", db_path);
    println!("  Migrations applied: {}", applied.len());
    Ok(())
}
