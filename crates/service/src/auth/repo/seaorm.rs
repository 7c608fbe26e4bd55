use sea_orm::DatabaseConnection;

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_credentials(c: models::credential::Model) -> Credentials {
    Credentials {
        user: AuthUser { id: c.id, username: c.username },
        password_hash: c.password_hash,
        password_algorithm: c.password_algorithm,
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>, AuthError> {
        let res = models::credential::find_by_username(&self.db, username).await?;
        Ok(res.map(to_credentials))
    }

    async fn upsert_password(&self, username: &str, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
        let c = models::credential::upsert_password(&self.db, username, password_hash, &password_algorithm).await?;
        Ok(to_credentials(c))
    }
}
