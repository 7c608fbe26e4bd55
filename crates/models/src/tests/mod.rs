/// Connection option tests
pub mod db_tests;


use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let db = crate::db::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
