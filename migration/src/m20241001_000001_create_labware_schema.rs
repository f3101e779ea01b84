use sea_orm_migration::prelude::*;

// Every rule enforced in-process is repeated here as a table constraint so that
// bulk inserts and direct writes cannot store a malformed identifier either.

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::too_many_lines)]
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres | sea_orm::DatabaseBackend::Sqlite => {}
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".to_string()));
            }
        }

        // Create formats table, keyed by bottom row + padded right column + prefix
        manager
            .create_table(
                Table::create()
                    .table(Formats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Formats::FormatKey)
                            .string_len(14)
                            .not_null()
                            .primary_key()
                            .check(Expr::cust(
                                "length(format_key) = 3 + length(prefix) \
                                 AND substr(format_key, 1, 1) = bottom_row",
                            )),
                    )
                    .col(
                        ColumnDef::new(Formats::BottomRow)
                            .string_len(1)
                            .not_null()
                            .default("H")
                            .check(Expr::cust(
                                "length(bottom_row) = 1 AND bottom_row >= 'A' AND bottom_row <= 'P'",
                            )),
                    )
                    .col(
                        ColumnDef::new(Formats::RightColumn)
                            .small_integer()
                            .not_null()
                            .default(12)
                            .check(Expr::cust("right_column >= 1 AND right_column <= 24")),
                    )
                    .col(
                        ColumnDef::new(Formats::Prefix)
                            .string_len(11)
                            .not_null()
                            .unique_key()
                            // Dot separates the container code from the well label
                            .check(Expr::cust(
                                "length(prefix) <= 11 AND prefix NOT LIKE '%.%'",
                            )),
                    )
                    .col(
                        ColumnDef::new(Formats::Purpose)
                            .text()
                            .not_null()
                            .unique_key()
                            .check(Expr::cust("length(purpose) >= 1")),
                    )
                    .col(
                        ColumnDef::new(Formats::LastNumber)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::cust("last_number >= 0")),
                    )
                    .col(
                        ColumnDef::new(Formats::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create containers table
        manager
            .create_table(
                Table::create()
                    .table(Containers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Containers::Code)
                            .string_len(15)
                            .not_null()
                            .primary_key()
                            .check(Expr::cust(
                                "length(code) = 15 \
                                 AND substr(code, 1, length(format_key)) = format_key",
                            )),
                    )
                    .col(ColumnDef::new(Containers::FormatKey).string_len(14).not_null())
                    .col(
                        ColumnDef::new(Containers::ExternalId)
                            .big_integer()
                            .check(Expr::cust("external_id IS NULL OR external_id >= 0")),
                    )
                    .col(
                        ColumnDef::new(Containers::SequenceNumber)
                            .big_integer()
                            .not_null()
                            .check(Expr::cust("sequence_number >= 0")),
                    )
                    .col(
                        ColumnDef::new(Containers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_containers_format_key")
                            .from(Containers::Table, Containers::FormatKey)
                            .to(Formats::Table, Formats::FormatKey)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create wells table; bounds come from the characters of the container code
        manager
            .create_table(
                Table::create()
                    .table(Wells::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Wells::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Wells::ContainerCode).string_len(15).not_null())
                    .col(
                        ColumnDef::new(Wells::RowLetter)
                            .string_len(1)
                            .not_null()
                            .check(Expr::cust(
                                "length(row_letter) = 1 AND row_letter >= 'A' \
                                 AND row_letter <= substr(container_code, 1, 1)",
                            )),
                    )
                    .col(
                        ColumnDef::new(Wells::ColumnNumber)
                            .small_integer()
                            .not_null()
                            .check(Expr::cust(
                                "column_number >= 1 \
                                 AND column_number <= CAST(substr(container_code, 2, 2) AS INTEGER)",
                            )),
                    )
                    .col(
                        ColumnDef::new(Wells::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wells_container_code")
                            .from(Wells::Table, Wells::ContainerCode)
                            .to(Containers::Table, Containers::Code)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("unique_container_row_column")
                    .table(Wells::Table)
                    .col(Wells::ContainerCode)
                    .col(Wells::RowLetter)
                    .col(Wells::ColumnNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create plans table
        manager
            .create_table(
                Table::create()
                    .table(Plans::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Plans::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Plans::Name).text().not_null())
                    .col(
                        ColumnDef::new(Plans::CreatedBy)
                            .text()
                            .not_null()
                            .check(Expr::cust("length(created_by) >= 1")),
                    )
                    .col(ColumnDef::new(Plans::AssignedTo).text())
                    .col(
                        ColumnDef::new(Plans::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create transfers table
        manager
            .create_table(
                Table::create()
                    .table(Transfers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Transfers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Transfers::PlanId).uuid().not_null())
                    .col(ColumnDef::new(Transfers::SourceId).uuid().not_null())
                    .col(ColumnDef::new(Transfers::SinkId).uuid().not_null())
                    .col(
                        ColumnDef::new(Transfers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transfers_plan_id")
                            .from(Transfers::Table, Transfers::PlanId)
                            .to(Plans::Table, Plans::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transfers_source_id")
                            .from(Transfers::Table, Transfers::SourceId)
                            .to(Wells::Table, Wells::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transfers_sink_id")
                            .from(Transfers::Table, Transfers::SinkId)
                            .to(Wells::Table, Wells::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse dependency order
        manager
            .drop_table(Table::drop().table(Transfers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Plans::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Wells::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Containers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Formats::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Formats {
    Table,
    FormatKey,
    BottomRow,
    RightColumn,
    Prefix,
    Purpose,
    LastNumber,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Containers {
    Table,
    Code,
    FormatKey,
    ExternalId,
    SequenceNumber,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Wells {
    Table,
    Id,
    ContainerCode,
    RowLetter,
    ColumnNumber,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Plans {
    Table,
    Id,
    Name,
    CreatedBy,
    AssignedTo,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Transfers {
    Table,
    Id,
    PlanId,
    SourceId,
    SinkId,
    CreatedAt,
}
