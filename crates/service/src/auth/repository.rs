use async_trait::async_trait;

use super::domain::Credentials;
use super::errors::AuthError;

/// Repository abstraction for credential persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>, AuthError>;
    async fn upsert_password(&self, username: &str, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::auth::domain::AuthUser;

    #[derive(Default)]
    pub struct MockAuthRepository {
        creds: Mutex<HashMap<String, Credentials>>, // key: username
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(username).cloned())
        }

        async fn upsert_password(&self, username: &str, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
            let mut creds = self.creds.lock().unwrap();
            let next_id = creds.len() as i32 + 1;
            let id = creds.get(username).map(|c| c.user.id).unwrap_or(next_id);
            let c = Credentials { user: AuthUser { id, username: username.to_string() }, password_hash, password_algorithm };
            creds.insert(username.to_string(), c.clone());
            Ok(c)
        }
    }
}
