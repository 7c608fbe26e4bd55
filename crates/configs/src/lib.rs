use anyhow::anyhow;
use anyhow::Result;
use common::utils::logging::LogFormat;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Mark the session cookie `Secure`; enable behind TLS.
    #[serde(default)]
    pub secure_cookies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4), secure_cookies: false }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Session signing and the bootstrap account. Nothing here has a built-in value.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub session_secret: String,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: u32,
    #[serde(default)]
    pub bootstrap_username: Option<String>,
    #[serde(default)]
    pub bootstrap_password: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: String::new(),
            session_ttl_hours: default_session_ttl(),
            bootstrap_username: None,
            bootstrap_password: None,
        }
    }
}

fn default_session_ttl() -> u32 { 12 }

pub const MIN_SESSION_SECRET_LEN: usize = 32;

/// How a search term is applied when the request does or does not name a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPolicy {
    /// Named field only; otherwise OR across the text columns.
    #[default]
    FieldOrAny,
    /// Named field only; otherwise `full_name`.
    FieldOnly,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub search_policy: SearchPolicy,
    #[serde(default = "default_limit")]
    pub default_limit: u64,
    #[serde(default = "default_max_limit")]
    pub max_limit: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self { search_policy: SearchPolicy::default(), default_limit: default_limit(), max_limit: default_max_limit() }
    }
}

fn default_limit() -> u64 { 20 }
fn default_max_limit() -> u64 { 100 }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), fall back to defaults when the file
    /// is absent, apply environment overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path).map_err(|e| anyhow!("cannot load {path}: {e}"))?
        } else {
            AppConfig::default()
        };
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Environment values win over file values when present. A value that is
    /// set but does not parse is an error rather than a silent fallback.
    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = get("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("SERVER_PORT") {
            self.server.port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow!("SERVER_PORT={port:?} is not a valid port: {e}"))?;
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = get("SESSION_SECRET") {
            self.auth.session_secret = secret;
        }
        if let Some(user) = get("BOOTSTRAP_USERNAME") {
            self.auth.bootstrap_username = Some(user);
        }
        if let Some(pass) = get("BOOTSTRAP_PASSWORD") {
            self.auth.bootstrap_password = Some(pass);
        }
        if let Some(format) = get("LOG_FORMAT") {
            self.logging.format = format.parse().map_err(|e| anyhow!("LOG_FORMAT: {e}"))?;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.directory.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<()> {
        if self.session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(anyhow!(
                "auth.session_secret must be at least {MIN_SESSION_SECRET_LEN} bytes; set it in config.toml or SESSION_SECRET"
            ));
        }
        if self.session_ttl_hours == 0 {
            return Err(anyhow!("auth.session_ttl_hours must be >= 1"));
        }
        match (&self.bootstrap_username, &self.bootstrap_password) {
            (Some(u), Some(p)) if !u.trim().is_empty() && !p.is_empty() => Ok(()),
            (None, None) => Ok(()),
            _ => Err(anyhow!("auth.bootstrap_username and auth.bootstrap_password must be set together")),
        }
    }

    /// The bootstrap account, when configured.
    pub fn bootstrap_account(&self) -> Option<(&str, &str)> {
        match (&self.bootstrap_username, &self.bootstrap_password) {
            (Some(u), Some(p)) => Some((u.trim(), p.as_str())),
            _ => None,
        }
    }
}

impl DirectoryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_limit == 0 || self.max_limit == 0 {
            return Err(anyhow!("directory limits must be >= 1"));
        }
        if self.default_limit > self.max_limit {
            return Err(anyhow!("directory.default_limit must be <= max_limit"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn valid() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.database.url = "sqlite::memory:".into();
        cfg.auth.session_secret = SECRET.into();
        cfg
    }

    #[test]
    fn parses_full_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            url = "postgres://hr:hr@localhost/hr"

            [auth]
            session_secret = "0123456789abcdef0123456789abcdef"
            bootstrap_username = "admin"
            bootstrap_password = "Adm1n!"

            [directory]
            search_policy = "field_only"
            max_limit = 50

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.directory.search_policy, SearchPolicy::FieldOnly);
        assert_eq!(cfg.directory.default_limit, 20);
        assert_eq!(cfg.directory.max_limit, 50);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.auth.bootstrap_account(), Some(("admin", "Adm1n!")));
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("DATABASE_URL", "postgres://env/db"),
            ("SERVER_PORT", "7070"),
            ("SESSION_SECRET", SECRET),
            ("BOOTSTRAP_USERNAME", "hr"),
            ("BOOTSTRAP_PASSWORD", "secret"),
        ]
        .into_iter()
        .collect();
        let mut cfg = AppConfig::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.database.url, "postgres://env/db");
        assert_eq!(cfg.server.port, 7070);
        assert!(cfg.normalize_and_validate().is_ok());
    }

    #[test]
    fn unparsable_env_values_are_errors() {
        for (key, value) in [("SERVER_PORT", "80a"), ("SERVER_PORT", "70000"), ("LOG_FORMAT", "xml")] {
            let mut cfg = valid();
            let err = cfg.apply_env(|k| (k == key).then(|| value.to_string())).unwrap_err();
            assert!(err.to_string().contains(key), "{err}");
        }
        let mut cfg = valid();
        cfg.apply_env(|k| (k == "SERVER_PORT").then(|| " 8081 ".to_string())).unwrap();
        assert_eq!(cfg.server.port, 8081);
    }

    #[test]
    fn missing_secret_is_rejected() {
        let mut cfg = valid();
        cfg.auth.session_secret = "short".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn half_bootstrap_account_is_rejected() {
        let mut cfg = valid();
        cfg.auth.bootstrap_username = Some("admin".into());
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn unsupported_database_scheme_is_rejected() {
        let mut cfg = valid();
        cfg.database.url = "mysql://localhost/hr".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn limits_must_be_consistent() {
        let mut cfg = valid();
        cfg.directory.default_limit = 200;
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn zero_worker_threads_normalized() {
        let mut cfg = valid();
        cfg.server.worker_threads = Some(0);
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.worker_threads, Some(4));
    }
}
