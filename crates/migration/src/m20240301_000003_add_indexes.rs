use sea_orm_migration::prelude::*;

use crate::m20240301_000001_create_employee::Employee;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Default sort column
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_full_name")
                    .table(Employee::Table)
                    .col(Employee::FullName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_hire_date")
                    .table(Employee::Table)
                    .col(Employee::HireDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_employee_hire_date").table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employee_full_name").table(Employee::Table).to_owned())
            .await
    }
}
