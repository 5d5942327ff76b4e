use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Newsletters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Newsletters::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Newsletters::Email)
                            .string_len(254)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Newsletters::VerificationToken).string_len(64))
                    .col(
                        ColumnDef::new(Newsletters::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Newsletters::RegistrationDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Newsletters::Table)
                    .col(Newsletters::VerificationToken)
                    .name("idx_newsletters_verification_token")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Newsletters::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Newsletters {
    Table,
    Id,
    Email,
    VerificationToken,
    IsVerified,
    RegistrationDate,
}
