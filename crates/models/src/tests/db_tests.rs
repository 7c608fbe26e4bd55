use sea_orm::{EntityTrait, PaginatorTrait};

use crate::db::{connect_options, is_in_memory, DatabaseConfig};

#[test]
fn detects_in_memory_sqlite() {
    assert!(is_in_memory("sqlite::memory:"));
    assert!(is_in_memory("sqlite://file:hr?mode=memory&cache=shared"));
    assert!(!is_in_memory("sqlite://data/hr.db"));
    assert!(!is_in_memory("postgres://localhost/hr"));
}

#[test]
fn in_memory_pool_is_pinned_to_one_connection() {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), max_connections: 8, ..DatabaseConfig::default() };
    let opt = connect_options(&cfg);
    assert_eq!(opt.get_max_connections(), Some(1));
    assert_eq!(opt.get_min_connections(), Some(1));
}

#[test]
fn server_pool_uses_configured_sizes() {
    let cfg = DatabaseConfig { url: "postgres://localhost/hr".into(), max_connections: 12, min_connections: 3, ..DatabaseConfig::default() };
    let opt = connect_options(&cfg);
    assert_eq!(opt.get_max_connections(), Some(12));
    assert_eq!(opt.get_min_connections(), Some(3));
}

#[tokio::test]
async fn migrations_apply_on_fresh_database() -> anyhow::Result<()> {
    let db = super::setup_test_db().await?;
    let n = crate::employee::Entity::find().count(&db).await?;
    assert_eq!(n, 0);
    Ok(())
}
