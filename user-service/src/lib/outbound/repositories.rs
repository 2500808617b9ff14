pub mod category;
pub mod user;

use std::str::FromStr;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub use category::SqliteCategoryRepository;
pub use user::SqliteUserRepository;

use crate::config::DatabaseConfig;

/// Open a connection pool against the configured SQLite database.
///
/// Connections never expire: an in-memory database lives as long as its last
/// connection, so the pool keeps it open until [`SqlitePool::close`].
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // In-memory databases run on a single connection.
    let max_connections = if is_in_memory(&config.url) && config.max_connections > 1 {
        tracing::warn!(
            requested = config.max_connections,
            "In-memory database limited to a single connection"
        );
        1
    } else {
        config.max_connections.max(1)
    };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Create or upgrade the users and categories tables.
pub async fn apply_schema(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_in_memory() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://:memory:"));
        assert!(is_in_memory("sqlite:file:ent?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://users.db"));
    }
}
