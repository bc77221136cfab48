/**
 * Server Configuration
 *
 * This module loads the server configuration and opens the optional
 * PostgreSQL connection.
 *
 * # Configuration Sources
 *
 * Values are resolved in three layers, later layers winning:
 *
 * 1. Built-in defaults, suitable for local development
 * 2. A TOML file, when `CONTACTBOOK_CONFIG` points at one
 * 3. Environment variables (`.env` is loaded by the binary beforehand)
 *
 * # Error Handling
 *
 * Malformed values abort startup with a `ConfigError`. A database that
 * cannot be reached does not: the server logs a warning and falls back to
 * the in-memory store.
 */

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;

/// Environment variable holding the optional TOML config path
pub const CONFIG_PATH_VAR: &str = "CONTACTBOOK_CONFIG";

/// Secret used when `JWT_SECRET` is not configured. Development only.
pub const DEV_JWT_SECRET: &str = "contactbook-dev-secret-change-me";

/// bcrypt work factor used when `BCRYPT_COST` is not configured
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `ServerConfig`
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value could not be parsed or is out of range
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    /// A required value is missing
    #[error("missing required setting {0}")]
    Missing(String),
}

impl ConfigError {
    fn invalid(key: &str, value: impl ToString) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// SMTP relay settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender mailbox, e.g. `Contactbook <noreply@example.com>`
    pub from: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 465,
            username: String::new(),
            password: String::new(),
            from: String::new(),
        }
    }
}

/// Contact service settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactsConfig {
    /// Restrict every contact operation to the caller's own records
    pub owner_scoped: bool,
}

/// Complete server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// PostgreSQL URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub bcrypt_cost: u32,
    /// Origin used to build links in outgoing email
    pub public_base_url: String,
    /// Root of statically served files; avatars live in `{public_dir}/avatars`
    pub public_dir: PathBuf,
    /// Staging area for uploads
    pub temp_dir: PathBuf,
    /// Edge length of stored avatars, in pixels
    pub avatar_size: u32,
    /// Upper bound on an avatar upload body
    pub max_avatar_bytes: usize,
    /// `None` selects the log mailer
    pub smtp: Option<SmtpConfig>,
    pub contacts: ContactsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_minutes: 15,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            public_base_url: "http://localhost:3000".to_string(),
            public_dir: PathBuf::from("public"),
            temp_dir: PathBuf::from("tmp"),
            avatar_size: 200,
            max_avatar_bytes: 5 * 1024 * 1024,
            smtp: None,
            contacts: ContactsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` in place of the environment
    pub fn from_sources<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_env(&lookup)?;
        config.validate()?;

        if config.jwt_secret == DEV_JWT_SECRET {
            tracing::warn!("JWT_SECRET not set, using the development secret");
        }

        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&raw)?)
    }

    /// `host:port` string for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn apply_env<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.host = host;
        }
        override_parsed(lookup, "SERVER_PORT", &mut self.port)?;
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            self.database_url = Some(url);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.jwt_secret = secret;
        }
        override_parsed(lookup, "TOKEN_TTL_MINUTES", &mut self.token_ttl_minutes)?;
        override_parsed(lookup, "BCRYPT_COST", &mut self.bcrypt_cost)?;
        if let Some(url) = lookup("PUBLIC_BASE_URL") {
            self.public_base_url = url;
        }
        if let Some(dir) = lookup("PUBLIC_DIR") {
            self.public_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("TEMP_DIR") {
            self.temp_dir = PathBuf::from(dir);
        }
        override_parsed(
            lookup,
            "CONTACTS_OWNER_SCOPED",
            &mut self.contacts.owner_scoped,
        )?;

        if let Some(host) = lookup("SMTP_HOST").filter(|host| !host.is_empty()) {
            let mut smtp = self.smtp.take().unwrap_or_default();
            smtp.host = host;
            self.smtp = Some(smtp);
        }
        if let Some(smtp) = self.smtp.as_mut() {
            override_parsed(lookup, "SMTP_PORT", &mut smtp.port)?;
            if let Some(username) = lookup("SMTP_USERNAME") {
                smtp.username = username;
            }
            if let Some(password) = lookup("SMTP_PASSWORD") {
                smtp.password = password;
            }
            if let Some(from) = lookup("SMTP_FROM") {
                smtp.from = from;
            }
        }

        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET".to_string()));
        }
        if self.token_ttl_minutes <= 0 {
            return Err(ConfigError::invalid("TOKEN_TTL_MINUTES", self.token_ttl_minutes));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::invalid("BCRYPT_COST", self.bcrypt_cost));
        }
        if self.avatar_size == 0 {
            return Err(ConfigError::invalid("avatar_size", self.avatar_size));
        }
        if let Some(smtp) = &self.smtp {
            if smtp.host.is_empty() {
                return Err(ConfigError::Missing("SMTP_HOST".to_string()));
            }
            if smtp.from.is_empty() {
                return Err(ConfigError::Missing("SMTP_FROM".to_string()));
            }
        }
        Ok(())
    }
}

fn override_parsed<F, T>(lookup: &F, key: &str, target: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *target = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid(key, &raw))?;
    }
    Ok(())
}

/// Connect to PostgreSQL and run migrations
///
/// Returns `None` when the connection fails; the caller falls back to the
/// in-memory store. A failed migration is logged and the pool is still
/// returned, since the schema may already be current.
pub async fn load_database(database_url: &str) -> Option<PgPool> {
    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to the in-memory store");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(()) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
