//! Create `shop` table.
//! One JSON document per shop; `version` backs compare-and-swap writes.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Shop::Table)
                    .if_not_exists()
                    .col(string_len(Shop::Id, 24).primary_key())
                    .col(json_binary(Shop::Document).not_null())
                    .col(big_integer(Shop::Version).not_null().default(1))
                    .col(timestamp_with_time_zone(Shop::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Shop::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shop_created_at")
                    .table(Shop::Table)
                    .col(Shop::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Shop::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Shop {
    Table,
    Id,
    Document,
    Version,
    CreatedAt,
    UpdatedAt,
}
