use sea_orm_migration::prelude::*;

mod m20260301_000001_create_accounts;
mod m20260301_000002_create_newsletters;
mod m20260301_000003_create_contact_messages;
mod m20260301_000004_create_courses;
mod m20260301_000005_create_blog_posts;
mod m20260301_000006_create_team_members;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_accounts::Migration),
            Box::new(m20260301_000002_create_newsletters::Migration),
            Box::new(m20260301_000003_create_contact_messages::Migration),
            Box::new(m20260301_000004_create_courses::Migration),
            Box::new(m20260301_000005_create_blog_posts::Migration),
            Box::new(m20260301_000006_create_team_members::Migration),
        ]
    }
}
