//! Lower-cased copies of the searchable text columns.
//!
//! The application writes them on every insert/update; the backfill below
//! only covers rows that existed before this migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

const FOLDED: [(Employee, Employee, u32); 4] = [
    (Employee::FullNameFolded, Employee::FullName, 200),
    (Employee::PositionFolded, Employee::Position, 100),
    (Employee::PhoneFolded, Employee::Phone, 20),
    (Employee::EmailFolded, Employee::Email, 120),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite only accepts one column per ALTER TABLE
        for (folded, _, len) in FOLDED {
            manager
                .alter_table(
                    Table::alter()
                        .table(Employee::Table)
                        .add_column(string_len(folded, len).not_null().default(""))
                        .to_owned(),
                )
                .await?;
        }

        let mut backfill = Query::update();
        backfill.table(Employee::Table);
        for (folded, source, _) in FOLDED {
            backfill.value(folded, Func::lower(Expr::col(source)));
        }
        manager.exec_stmt(backfill).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (folded, _, _) in FOLDED {
            manager
                .alter_table(Table::alter().table(Employee::Table).drop_column(folded).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Employee {
    Table,
    FullName,
    Position,
    Phone,
    Email,
    FullNameFolded,
    PositionFolded,
    PhoneFolded,
    EmailFolded,
}
