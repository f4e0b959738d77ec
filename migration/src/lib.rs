pub use sea_orm_migration::prelude::*;

mod m20250201_000001_create_catalog;
mod m20250201_000002_create_search_query;

/// Catalog schema: films, categories and their join table.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250201_000001_create_catalog::Migration)]
    }
}

/// Search-query analytics schema. Tracked in its own bookkeeping table so
/// it can share a database file with the catalog.
pub struct AnalyticsMigrator;

#[async_trait::async_trait]
impl MigratorTrait for AnalyticsMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250201_000002_create_search_query::Migration)]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_analytics").into_iden()
    }
}
