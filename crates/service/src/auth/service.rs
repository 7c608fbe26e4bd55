use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, AuthUser, Credentials, LoginInput};
use super::errors::AuthError;
use super::password;
use super::repository::AuthRepository;
use super::session::{SessionEntry, SessionStore};

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    sessions: Arc<SessionStore>,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, sessions: Arc<SessionStore>) -> Self { Self { repo, sessions } }

    pub fn sessions(&self) -> &Arc<SessionStore> { &self.sessions }

    /// Validate the password against the allowed set, hash it and store it,
    /// creating the account when it does not exist yet.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, SessionStore, repository::mock::MockAuthRepository};
    /// let sessions = Arc::new(SessionStore::new("0123456789abcdef0123456789abcdef", chrono::Duration::hours(1)));
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), sessions);
    /// let user = tokio_test::block_on(svc.set_password("admin", "Adm1n!")).unwrap();
    /// assert_eq!(user.username, "admin");
    /// assert!(tokio_test::block_on(svc.set_password("admin", "has space")).is_err());
    /// ```
    #[instrument(skip(self, new_password))]
    pub async fn set_password(&self, username: &str, new_password: &str) -> Result<AuthUser, AuthError> {
        if username.trim().is_empty() {
            return Err(AuthError::Validation("username must not be empty".into()));
        }
        password::check_policy(new_password)?;
        let hash = password::hash(new_password)?;
        let cred = self.repo.upsert_password(username, hash, password::ALGORITHM.to_string()).await?;
        info!(user_id = cred.user.id, "password_set");
        Ok(cred.user)
    }

    /// Create the configured account when it is missing. Returns whether it was created.
    #[instrument(skip(self, initial_password))]
    pub async fn bootstrap(&self, username: &str, initial_password: &str) -> Result<bool, AuthError> {
        if self.repo.find_credentials(username).await?.is_some() {
            debug!("bootstrap account already present");
            return Ok(false);
        }
        self.set_password(username, initial_password).await?;
        info!("bootstrap_account_created");
        Ok(true)
    }

    async fn verify(&self, input: &LoginInput) -> Result<Credentials, AuthError> {
        let Some(cred) = self.repo.find_credentials(&input.login).await? else {
            password::verify_decoy(&input.password);
            return Err(AuthError::Unauthorized);
        };
        if !password::verify(&input.password, &cred.password_hash)? {
            return Err(AuthError::Unauthorized);
        }
        Ok(cred)
    }

    /// Check credentials and open a session.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, SessionStore, repository::mock::MockAuthRepository};
    /// use service::auth::domain::LoginInput;
    /// let sessions = Arc::new(SessionStore::new("0123456789abcdef0123456789abcdef", chrono::Duration::hours(1)));
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), sessions);
    /// let _ = tokio_test::block_on(svc.set_password("u", "Passw0rd"));
    /// let session = tokio_test::block_on(svc.login(LoginInput { login: "u".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.username, "u");
    /// assert!(svc.authenticate(&session.token).is_some());
    /// ```
    #[instrument(skip(self, input), fields(login = %input.login))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let cred = match self.verify(&input).await {
            Ok(c) => c,
            Err(AuthError::Unauthorized) => {
                warn!("login_rejected");
                return Err(AuthError::Unauthorized);
            }
            Err(e) => return Err(e),
        };
        let token = self.sessions.issue(&cred.user)?;
        info!(user_id = cred.user.id, "login_succeeded");
        Ok(AuthSession { user: cred.user, token })
    }

    /// Invalidate the presented session, if any.
    pub fn logout(&self, token: Option<&str>) {
        if let Some(t) = token {
            self.sessions.revoke(t);
        }
    }

    pub fn authenticate(&self, token: &str) -> Option<SessionEntry> { self.sessions.resolve(token) }
}
