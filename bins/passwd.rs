//! Set (or create) an account password: `passwd <username> <password>`.

use std::process::ExitCode;
use std::sync::Arc;

use common::utils::logging::init_logging;
use tracing::{error, info};

use service::auth::repo::SeaOrmAuthRepository;
use service::auth::{AuthService, SessionStore};

async fn set_password(cfg: &configs::AppConfig, username: &str, password: &str) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    // sessions are not used by this command
    let sessions = Arc::new(SessionStore::new(&cfg.auth.session_secret, chrono::Duration::zero()));
    let svc = AuthService::new(Arc::new(SeaOrmAuthRepository::new(db)), sessions);
    let user = svc.set_password(username, password).await?;
    info!(user_id = user.id, "password updated");
    Ok(())
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [username, password] = args.as_slice() else {
        eprintln!("usage: passwd <username> <password>");
        return ExitCode::from(2);
    };

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(cfg.logging.format);

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };
    match rt.block_on(set_password(&cfg, username, password)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "password not changed");
            ExitCode::FAILURE
        }
    }
}
