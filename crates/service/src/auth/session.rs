//! Server-side session registry.
//!
//! Clients hold an HS256 token naming a session id; the entry itself lives in
//! a concurrent map, so revoking a session takes effect immediately.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::domain::AuthUser;
use super::errors::AuthError;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sid: String,
    sub: String,
    exp: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    pub session_id: Uuid,
    pub user: AuthUser,
    pub expires_at: DateTime<Utc>,
}

pub struct SessionStore {
    entries: DashMap<Uuid, SessionEntry>,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        // Expiry is enforced against the map entry, not the token.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        Self {
            entries: DashMap::new(),
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Register a session for `user` and return its signed token.
    pub fn issue(&self, user: &AuthUser) -> Result<String, AuthError> {
        self.purge_expired();
        let session_id = Uuid::new_v4();
        let expires_at = Utc::now() + self.ttl;
        let claims = Claims {
            sid: session_id.to_string(),
            sub: user.username.clone(),
            exp: expires_at.timestamp().max(0) as usize,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        self.entries.insert(session_id, SessionEntry { session_id, user: user.clone(), expires_at });
        debug!(session_id = %session_id, user_id = user.id, "session_issued");
        Ok(token)
    }

    fn session_id(&self, token: &str) -> Option<Uuid> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).ok()?;
        Uuid::parse_str(&data.claims.sid).ok()
    }

    /// Live session for a token; expired entries are dropped on the way.
    pub fn resolve(&self, token: &str) -> Option<SessionEntry> {
        let sid = self.session_id(token)?;
        let entry = self.entries.get(&sid).map(|e| e.value().clone())?;
        if entry.expires_at <= Utc::now() {
            self.entries.remove(&sid);
            return None;
        }
        Some(entry)
    }

    /// Forget the session named by `token`. Unknown or garbage tokens are ignored.
    pub fn revoke(&self, token: &str) {
        if let Some(sid) = self.session_id(token) {
            if self.entries.remove(&sid).is_some() {
                debug!(session_id = %sid, "session_revoked");
            }
        }
    }

    pub fn purge_expired(&self) {
        let now = Utc::now();
        self.entries.retain(|_, e| e.expires_at > now);
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}
