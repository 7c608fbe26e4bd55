use serde::{Deserialize, Serialize};

/// Login form / JSON body. `username` is accepted for `login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(alias = "username")]
    pub login: String,
    pub password: String,
}

/// Authenticated account (business view)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
}

/// Stored credentials (hashed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub user: AuthUser,
    pub password_hash: String,
    pub password_algorithm: String,
}

/// Login result: the account plus the session token handed to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: String,
}
