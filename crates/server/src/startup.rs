use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::AppConfig;

use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Bring the schema up to date and create the configured account if it is missing.
pub async fn prepare(db: &DatabaseConnection, state: &ServerState, cfg: &AppConfig) -> anyhow::Result<()> {
    migration::Migrator::up(db, None).await?;
    if let Some((username, password)) = cfg.auth.bootstrap_account() {
        let created = state.auth.bootstrap(username, password).await?;
        info!(created, "bootstrap account checked");
    }
    Ok(())
}

/// Build the router over an existing connection; used by `run` and by tests.
pub fn build_app(db: DatabaseConnection, cfg: &AppConfig) -> (ServerState, Router) {
    let state = ServerState::new(db, cfg);
    let app = routes::build_router(state.clone(), build_cors());
    (state, app)
}

/// Public entry: connect, migrate, bootstrap and serve until ctrl-c.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    let (state, app) = build_app(db.clone(), &cfg);
    prepare(&db, &state, &cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, search_policy = ?cfg.directory.search_policy, "starting staff directory");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    info!("server stopped");
    Ok(())
}
