//! Create `credential` table storing salted password hashes per username.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Credential::Table)
                    .if_not_exists()
                    .col(pk_auto(Credential::Id))
                    .col(string_len(Credential::Username, 80).unique_key().not_null())
                    .col(string_len(Credential::PasswordHash, 255).not_null())
                    .col(string_len(Credential::PasswordAlgorithm, 64).not_null())
                    .col(timestamp_with_time_zone(Credential::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Credential::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Credential::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Credential {
    Table,
    Id,
    Username,
    PasswordHash,
    PasswordAlgorithm,
    CreatedAt,
    UpdatedAt,
}
