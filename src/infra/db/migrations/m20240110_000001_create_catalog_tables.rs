//! Migration: Create manufacturer and status lookup tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Manufacturers::Table)
                    .col(
                        ColumnDef::new(Manufacturers::Code)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Manufacturers::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StatusTypes::Table)
                    .col(
                        ColumnDef::new(StatusTypes::Code)
                            .small_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StatusTypes::Description).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Seed the closed status set
        manager
            .exec_stmt(
                Query::insert()
                    .into_table(StatusTypes::Table)
                    .columns([StatusTypes::Code, StatusTypes::Description])
                    .values_panic([1i16.into(), "Ativo".into()])
                    .values_panic([2i16.into(), "Removido".into()])
                    .values_panic([3i16.into(), "Pausado".into()])
                    .values_panic([4i16.into(), "Vendido".into()])
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StatusTypes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Manufacturers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Manufacturers {
    Table,
    Code,
    Name,
}

#[derive(Iden)]
enum StatusTypes {
    Table,
    Code,
    Description,
}
