use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogPosts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlogPosts::Title).string_len(255).not_null())
                    .col(ColumnDef::new(BlogPosts::Description).text())
                    .col(ColumnDef::new(BlogPosts::Body).text().not_null())
                    .col(ColumnDef::new(BlogPosts::ThumbnailUrl).string_len(200))
                    .col(ColumnDef::new(BlogPosts::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(BlogPosts::DateUploaded)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BlogPosts::Table, BlogPosts::CreatedBy)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(BlogPosts::Table)
                    .col(BlogPosts::CreatedBy)
                    .name("idx_blog_posts_created_by")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPosts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum BlogPosts {
    Table,
    Id,
    Title,
    Description,
    Body,
    ThumbnailUrl,
    CreatedBy,
    DateUploaded,
    UpdatedAt,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
}
