//! Create labels table migration (priorities and statuses)

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_projects::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Labels::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Labels::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Labels::ProjectId).string().not_null())
                    .col(ColumnDef::new(Labels::Kind).string_len(20).not_null())
                    .col(ColumnDef::new(Labels::Name).string_len(26).not_null())
                    .col(ColumnDef::new(Labels::Color).string_len(7).null())
                    .col(
                        ColumnDef::new(Labels::Transparent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Labels::CreatedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Labels::UpdatedOn)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_labels_project_id")
                            .from(Labels::Table, Labels::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_labels_project_kind")
                    .table(Labels::Table)
                    .col(Labels::ProjectId)
                    .col(Labels::Kind)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Labels::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Labels {
    Table,
    Id,
    ProjectId,
    Kind,
    Name,
    Color,
    Transparent,
    CreatedOn,
    UpdatedOn,
}
