//! CLI command implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;

use marketstall_web::db;

/// Connect to the shop database using the usual environment variables.
///
/// # Errors
///
/// Returns an error if neither `MARKETSTALL_DATABASE_URL` nor `DATABASE_URL`
/// is set, or if the connection fails.
pub async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("MARKETSTALL_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "MARKETSTALL_DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;
    Ok(pool)
}
