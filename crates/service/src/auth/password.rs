use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use once_cell::sync::Lazy;
use rand::rngs::OsRng;

use super::errors::AuthError;

pub const ALGORITHM: &str = "argon2";

const SPECIALS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Rejects empty passwords and anything outside ASCII letters, digits and
/// the punctuation in `SPECIALS`.
pub fn check_policy(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::Validation("password must not be empty".into()));
    }
    if let Some(bad) = password.chars().find(|c| !c.is_ascii_alphanumeric() && !SPECIALS.contains(*c)) {
        return Err(AuthError::Validation(format!("password contains disallowed character {bad:?}")));
    }
    Ok(())
}

/// Argon2 PHC string with a fresh random salt.
pub fn hash(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string())
}

pub fn verify(password: &str, phc: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(phc).map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

/// Hash with the same parameters as real accounts, checked when the username is unknown.
static DECOY_HASH: Lazy<Option<String>> = Lazy::new(|| hash("decoy-password").ok());

/// Spend one verification's worth of work without a stored hash, so unknown
/// usernames take as long to reject as wrong passwords.
pub fn verify_decoy(password: &str) {
    if let Some(phc) = DECOY_HASH.as_deref() {
        let _ = verify(password, phc);
    }
}
