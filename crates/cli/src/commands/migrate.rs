//! Database migration command.
//!
//! Runs the shop schema migrations from `crates/web/migrations/` and then
//! lets the session store create its own `sessions` table.

use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;

/// Run all database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    info!("Connected to database");

    info!("Running shop migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;

    info!("Running session store migration...");
    PostgresStore::new(pool.clone()).migrate().await?;

    info!("Migrations complete!");
    Ok(())
}
