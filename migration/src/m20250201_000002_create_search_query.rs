use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchQuery::Table)
                    .if_not_exists()
                    .col(pk_auto(SearchQuery::Id))
                    .col(string_uniq(SearchQuery::Query))
                    .col(big_integer(SearchQuery::Count).default(0))
                    .col(big_integer(SearchQuery::LastSearched))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_search_query_count")
                    .table(SearchQuery::Table)
                    .col(SearchQuery::Count)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_search_query_last_searched")
                    .table(SearchQuery::Table)
                    .col(SearchQuery::LastSearched)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SearchQuery::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum SearchQuery {
    Table,
    Id,
    Query,
    Count,
    LastSearched,
}
