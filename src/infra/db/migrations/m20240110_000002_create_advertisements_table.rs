//! Migration: Create the advertisements table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Advertisements::Table)
                    .col(
                        ColumnDef::new(Advertisements::Code)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Advertisements::UserCode)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Advertisements::ManufacturerCode)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Advertisements::Status)
                            .small_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Advertisements::ModelDescription)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Advertisements::Brand).string().not_null())
                    .col(
                        ColumnDef::new(Advertisements::Value)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Advertisements::YearManufacture)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Advertisements::YearModel)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Advertisements::Views)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Advertisements::TotalStoppedSeconds)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Advertisements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Advertisements::ImagePath).string().null())
                    .col(ColumnDef::new(Advertisements::Description).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_advertisements_manufacturer_code")
                            .from(Advertisements::Table, Advertisements::ManufacturerCode)
                            .to(Manufacturers::Table, Manufacturers::Code),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_advertisements_status")
                            .from(Advertisements::Table, Advertisements::Status)
                            .to(StatusTypes::Table, StatusTypes::Code),
                    )
                    .to_owned(),
            )
            .await?;

        // Indexes backing public listing, owner screens and the reports
        manager
            .create_index(
                Index::create()
                    .name("idx_advertisements_status")
                    .table(Advertisements::Table)
                    .col(Advertisements::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_advertisements_user_code")
                    .table(Advertisements::Table)
                    .col(Advertisements::UserCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_advertisements_created_at")
                    .table(Advertisements::Table)
                    .col(Advertisements::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Advertisements::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Advertisements {
    Table,
    Code,
    UserCode,
    ManufacturerCode,
    Status,
    ModelDescription,
    Brand,
    Value,
    YearManufacture,
    YearModel,
    Views,
    TotalStoppedSeconds,
    CreatedAt,
    ImagePath,
    Description,
}

#[derive(Iden)]
enum Manufacturers {
    Table,
    Code,
}

#[derive(Iden)]
enum StatusTypes {
    Table,
    Code,
}
