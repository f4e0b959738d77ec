use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Film::Table)
                    .if_not_exists()
                    .col(pk_auto(Film::FilmId))
                    .col(string_len(Film::Title, 128))
                    .col(text_null(Film::Description))
                    .col(integer_null(Film::ReleaseYear))
                    .col(integer(Film::LanguageId))
                    .col(integer_null(Film::OriginalLanguageId))
                    .col(integer(Film::RentalDuration).default(3))
                    .col(decimal_len(Film::RentalRate, 4, 2).default(4.99))
                    .col(integer_null(Film::Length))
                    .col(decimal_len(Film::ReplacementCost, 5, 2).default(19.99))
                    .col(string_len_null(Film::Rating, 5).default("G"))
                    .col(string_null(Film::SpecialFeatures))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_film_title")
                    .table(Film::Table)
                    .col(Film::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_film_release_year")
                    .table(Film::Table)
                    .col(Film::ReleaseYear)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(pk_auto(Category::CategoryId))
                    .col(string_len(Category::Name, 25))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FilmCategory::Table)
                    .if_not_exists()
                    .col(integer(FilmCategory::FilmId))
                    .col(integer(FilmCategory::CategoryId))
                    .primary_key(
                        Index::create().col(FilmCategory::FilmId).col(FilmCategory::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_film_category_film")
                            .from(FilmCategory::Table, FilmCategory::FilmId)
                            .to(Film::Table, Film::FilmId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_film_category_category")
                            .from(FilmCategory::Table, FilmCategory::CategoryId)
                            .to(Category::Table, Category::CategoryId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_film_category_category")
                    .table(FilmCategory::Table)
                    .col(FilmCategory::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(FilmCategory::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Category::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Film::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Film {
    Table,
    FilmId,
    Title,
    Description,
    ReleaseYear,
    LanguageId,
    OriginalLanguageId,
    RentalDuration,
    RentalRate,
    Length,
    ReplacementCost,
    Rating,
    SpecialFeatures,
}

#[derive(DeriveIden)]
enum Category {
    Table,
    CategoryId,
    Name,
}

#[derive(DeriveIden)]
enum FilmCategory {
    Table,
    FilmId,
    CategoryId,
}
