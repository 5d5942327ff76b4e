use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::Email)
                            .string_len(254)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::Username)
                            .string_len(150)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::PasswordHash)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accounts::Role).string_len(20))
                    .col(
                        ColumnDef::new(Accounts::Firstname)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Accounts::Lastname)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Accounts::Middlename).string_len(100))
                    .col(ColumnDef::new(Accounts::Phonenumber).string_len(20))
                    .col(
                        ColumnDef::new(Accounts::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Accounts::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Accounts::VerificationToken).string_len(64))
                    .col(
                        ColumnDef::new(Accounts::VerificationTokenExpiresAt)
                            .timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(Accounts::ResetPasswordToken).string_len(64))
                    .col(ColumnDef::new(Accounts::ResetTokenExpiresAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Accounts::DateJoined)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accounts::LastLogin).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Accounts::Table)
                    .col(Accounts::VerificationToken)
                    .name("idx_accounts_verification_token")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Accounts::Table)
                    .col(Accounts::ResetPasswordToken)
                    .name("idx_accounts_reset_password_token")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    Email,
    Username,
    PasswordHash,
    Role,
    Firstname,
    Lastname,
    Middlename,
    Phonenumber,
    IsActive,
    IsVerified,
    VerificationToken,
    VerificationTokenExpiresAt,
    ResetPasswordToken,
    ResetTokenExpiresAt,
    DateJoined,
    LastLogin,
}
