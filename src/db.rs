use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};
use sea_orm_migration::MigratorTrait;

use crate::error::AppResult;

const SQLITE_PRAGMAS: [&str; 3] =
    ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL", "PRAGMA cache_size=-64000"];

/// Opens the catalog database and brings its schema up to date.
pub async fn connect_catalog(database_url: &str) -> AppResult<DatabaseConnection> {
    let db = connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Opens the search-query store and brings its schema up to date.
pub async fn connect_analytics(database_url: &str) -> AppResult<DatabaseConnection> {
    let db = connect(database_url).await?;
    migration::AnalyticsMigrator::up(&db, None).await?;
    Ok(db)
}

async fn connect(database_url: &str) -> AppResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new(database_url);
    opts.connect_timeout(Duration::from_secs(10)).sqlx_logging(false);

    // Every pooled connection to `sqlite::memory:` would see its own empty
    // database.
    if database_url.contains(":memory:") {
        opts.max_connections(1).min_connections(1);
    }

    let db = Database::connect(opts).await?;

    if db.get_database_backend() == DatabaseBackend::Sqlite {
        for pragma in SQLITE_PRAGMAS {
            db.execute(Statement::from_string(DatabaseBackend::Sqlite, pragma.to_string())).await?;
        }
    }

    Ok(db)
}
