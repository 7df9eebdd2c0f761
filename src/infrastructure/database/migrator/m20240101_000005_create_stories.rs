//! Create stories table migration

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000002_create_projects::Projects;
use super::m20240101_000004_create_labels::Labels;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Stories::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Stories::ProjectId).string().not_null())
                    .col(ColumnDef::new(Stories::CreatorId).string().not_null())
                    .col(ColumnDef::new(Stories::OwnerId).string().null())
                    .col(ColumnDef::new(Stories::PriorityId).string().null())
                    .col(ColumnDef::new(Stories::StatusId).string().null())
                    .col(ColumnDef::new(Stories::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Stories::Details).text().null())
                    .col(ColumnDef::new(Stories::Points).integer().null())
                    .col(
                        ColumnDef::new(Stories::CreatedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Stories::UpdatedOn)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stories_project_id")
                            .from(Stories::Table, Stories::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stories_creator_id")
                            .from(Stories::Table, Stories::CreatorId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stories_owner_id")
                            .from(Stories::Table, Stories::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stories_priority_id")
                            .from(Stories::Table, Stories::PriorityId)
                            .to(Labels::Table, Labels::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stories_status_id")
                            .from(Stories::Table, Stories::StatusId)
                            .to(Labels::Table, Labels::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stories_project_id")
                    .table(Stories::Table)
                    .col(Stories::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stories_owner_id")
                    .table(Stories::Table)
                    .col(Stories::OwnerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stories::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Stories {
    Table,
    Id,
    ProjectId,
    CreatorId,
    OwnerId,
    PriorityId,
    StatusId,
    Name,
    Details,
    Points,
    CreatedOn,
    UpdatedOn,
}
