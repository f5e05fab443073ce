//! Postgres persistence for the publication activity.

use std::collections::HashSet;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod store;

pub use store::PgApprovalStore;

pub type DbPool = sqlx::PgPool;

static MIGRATOR: Migrator = sqlx::migrate!("../../db/migrations");

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Number of embedded migrations not yet recorded as applied.
///
/// Fails when the bookkeeping table is missing, i.e. migrations never ran.
pub async fn pending_migrations(pool: &DbPool) -> Result<usize, sqlx::Error> {
    let applied: Vec<(i64,)> = sqlx::query_as("SELECT version FROM _sqlx_migrations WHERE success")
        .fetch_all(pool)
        .await?;
    let applied: HashSet<i64> = applied.into_iter().map(|(version,)| version).collect();
    Ok(MIGRATOR
        .iter()
        .filter(|migration| !applied.contains(&migration.version))
        .count())
}
