//! Migration: Create the chats table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chats::Table)
                    .col(
                        ColumnDef::new(Chats::Code)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Chats::AdvertisementCode)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Chats::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chats_advertisement_code")
                            .from(Chats::Table, Chats::AdvertisementCode)
                            .to(Advertisements::Table, Advertisements::Code),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_chats_advertisement_code")
                    .table(Chats::Table)
                    .col(Chats::AdvertisementCode)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Chats::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Chats {
    Table,
    Code,
    AdvertisementCode,
    CreatedAt,
}

#[derive(Iden)]
enum Advertisements {
    Table,
    Code,
}
