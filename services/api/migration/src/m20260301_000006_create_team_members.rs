use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeamMembers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TeamMembers::FullName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamMembers::Occupation)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(TeamMembers::Bio).text())
                    .col(ColumnDef::new(TeamMembers::AvatarUrl).string_len(200))
                    .col(ColumnDef::new(TeamMembers::EmailUrl).string_len(254))
                    .col(ColumnDef::new(TeamMembers::LinkedinUrl).string_len(200))
                    .col(
                        ColumnDef::new(TeamMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamMembers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TeamMembers {
    Table,
    Id,
    FullName,
    Occupation,
    Bio,
    AvatarUrl,
    EmailUrl,
    LinkedinUrl,
    CreatedAt,
    UpdatedAt,
}
