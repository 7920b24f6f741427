#[cfg(test)]
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

/// Fresh in-memory store. A single connection that is never reaped keeps the
/// database alive for the lifetime of the pool.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite pool")
}

/// In-memory store with the catalog schema but no rows
#[cfg(test)]
pub async fn empty_catalog() -> SqlitePool {
    let pool = memory_pool().await;
    crate::core::database::run_migrations(&pool)
        .await
        .expect("catalog migrations");
    pool
}

/// In-memory store with the schema and the built-in fixture
#[cfg(test)]
pub async fn seeded_catalog() -> SqlitePool {
    let pool = memory_pool().await;
    crate::core::database::initialize(&pool)
        .await
        .expect("catalog initialization");
    pool
}
