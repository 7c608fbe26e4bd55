//! Create `employee` table.
//!
//! Gender is kept as a one-letter code (`m` / `f`); probation defaults to false.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(pk_auto(Employee::Id))
                    .col(string_len(Employee::FullName, 200).not_null())
                    .col(string_len(Employee::Position, 100).not_null())
                    .col(string_len(Employee::Gender, 1).not_null())
                    .col(string_len(Employee::Phone, 20).not_null().default(""))
                    .col(string_len(Employee::Email, 120).not_null().default(""))
                    .col(boolean(Employee::OnProbation).not_null().default(false))
                    .col(date(Employee::HireDate).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employee::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Employee { Table, Id, FullName, Position, Gender, Phone, Email, OnProbation, HireDate }
