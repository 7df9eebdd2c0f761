//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_projects;
mod m20240101_000003_create_memberships;
mod m20240101_000004_create_labels;
mod m20240101_000005_create_stories;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_projects::Migration),
            Box::new(m20240101_000003_create_memberships::Migration),
            Box::new(m20240101_000004_create_labels::Migration),
            Box::new(m20240101_000005_create_stories::Migration),
        ]
    }
}
