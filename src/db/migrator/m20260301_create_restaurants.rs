use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Restaurants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Restaurants::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Restaurants::GooglePlaceId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Restaurants::Name).string().not_null())
                    .col(ColumnDef::new(Restaurants::Address).string())
                    .col(ColumnDef::new(Restaurants::Lat).double())
                    .col(ColumnDef::new(Restaurants::Lng).double())
                    .col(ColumnDef::new(Restaurants::Rating).double())
                    .col(ColumnDef::new(Restaurants::PriceLevel).integer())
                    .col(ColumnDef::new(Restaurants::PhotoUrl).text())
                    .col(ColumnDef::new(Restaurants::CuisineType).string())
                    .col(ColumnDef::new(Restaurants::CachedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // The upsert in the cache conflicts on this index.
        manager
            .create_index(
                Index::create()
                    .name("idx_restaurants_google_place_id_unique")
                    .table(Restaurants::Table)
                    .col(Restaurants::GooglePlaceId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Restaurants::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Restaurants {
    Table,
    Id,
    GooglePlaceId,
    Name,
    Address,
    Lat,
    Lng,
    Rating,
    PriceLevel,
    PhotoUrl,
    CuisineType,
    CachedAt,
}
