use sea_orm_migration::prelude::*;

use crate::m20241001_000001_create_labware_schema::{Containers, Transfers};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============ CONTAINERS TABLE INDEXES ============
        manager
            .create_index(
                Index::create()
                    .name("idx_containers_format_key")
                    .table(Containers::Table)
                    .col(Containers::FormatKey)
                    .to_owned(),
            )
            .await?;

        // Same external id may only be used once per format
        manager
            .create_index(
                Index::create()
                    .name("unique_containers_format_external_id")
                    .table(Containers::Table)
                    .col(Containers::FormatKey)
                    .col(Containers::ExternalId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ============ TRANSFERS TABLE INDEXES ============
        manager
            .create_index(
                Index::create()
                    .name("idx_transfers_plan_id")
                    .table(Transfers::Table)
                    .col(Transfers::PlanId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transfers_source_id")
                    .table(Transfers::Table)
                    .col(Transfers::SourceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transfers_sink_id")
                    .table(Transfers::Table)
                    .col(Transfers::SinkId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_transfers_sink_id",
            "idx_transfers_source_id",
            "idx_transfers_plan_id",
            "unique_containers_format_external_id",
            "idx_containers_format_key",
        ] {
            manager
                .drop_index(Index::drop().name(name).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}
