//! Migrator registering entity-specific migrations in dependency order.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_employee;
mod m20240301_000002_create_credential;
mod m20240301_000003_add_indexes;
mod m20240301_000004_add_folded_columns;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_employee::Migration),
            Box::new(m20240301_000002_create_credential::Migration),
            Box::new(m20240301_000003_add_indexes::Migration),
            Box::new(m20240301_000004_add_folded_columns::Migration),
        ]
    }
}
