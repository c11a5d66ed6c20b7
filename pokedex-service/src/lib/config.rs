use std::env;
use std::str::FromStr;
use std::sync::Arc;

use auth::JwtHandler;
use auth::SessionIssuer;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use jsonwebtoken::Algorithm;
use serde::Deserialize;

/// Shortest signing secret accepted for HMAC signing.
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Longest accepted access token lifetime (one year).
pub const MAX_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 365 * 24 * 60;

/// Longest accepted refresh token lifetime (ten years).
pub const MAX_REFRESH_TOKEN_EXPIRE_DAYS: i64 = 10 * 365;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: i64,
    #[serde(default = "default_refresh_token_expire_days")]
    pub refresh_token_expire_days: i64,
}

// Keeps the secret out of logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("algorithm", &self.algorithm)
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .field("refresh_token_expire_days", &self.refresh_token_expire_days)
            .finish_non_exhaustive()
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_token_expire_minutes() -> i64 {
    auth::session::DEFAULT_ACCESS_TOKEN_LIFETIME_MINUTES
}

fn default_refresh_token_expire_days() -> i64 {
    auth::session::DEFAULT_REFRESH_TOKEN_LIFETIME_DAYS
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.jwt.validate()?;

        Ok(config)
    }
}

impl JwtConfig {
    /// Reject settings that would produce unusable or weak tokens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        if !(1..=MAX_ACCESS_TOKEN_EXPIRE_MINUTES).contains(&self.access_token_expire_minutes) {
            return Err(ConfigError::Message(format!(
                "jwt.access_token_expire_minutes must be between 1 and {}",
                MAX_ACCESS_TOKEN_EXPIRE_MINUTES
            )));
        }
        if !(1..=MAX_REFRESH_TOKEN_EXPIRE_DAYS).contains(&self.refresh_token_expire_days) {
            return Err(ConfigError::Message(format!(
                "jwt.refresh_token_expire_days must be between 1 and {}",
                MAX_REFRESH_TOKEN_EXPIRE_DAYS
            )));
        }
        self.signing_algorithm().map(|_| ())
    }

    pub fn signing_algorithm(&self) -> Result<Algorithm, ConfigError> {
        Algorithm::from_str(&self.algorithm)
            .map_err(|e| ConfigError::Message(format!("jwt.algorithm: {}", e)))
    }

    /// Build the session issuer (and its token handler) from these settings.
    ///
    /// # Errors
    /// * `ConfigError::Message` - Settings fail [`JwtConfig::validate`], or the
    ///   algorithm is not an HMAC algorithm
    pub fn session_issuer(&self) -> Result<SessionIssuer, ConfigError> {
        self.validate()?;

        let jwt_handler = JwtHandler::with_algorithm(self.secret.as_bytes(), self.signing_algorithm()?)
            .map_err(|e| ConfigError::Message(format!("jwt.algorithm: {}", e)))?;

        let access_token_lifetime = Duration::try_minutes(self.access_token_expire_minutes)
            .ok_or_else(|| lifetime_out_of_range("jwt.access_token_expire_minutes"))?;
        let refresh_token_lifetime = Duration::try_days(self.refresh_token_expire_days)
            .ok_or_else(|| lifetime_out_of_range("jwt.refresh_token_expire_days"))?;

        Ok(SessionIssuer::new(Arc::new(jwt_handler))
            .with_access_token_lifetime(access_token_lifetime)
            .with_refresh_token_lifetime(refresh_token_lifetime))
    }
}

fn lifetime_out_of_range(key: &str) -> ConfigError {
    ConfigError::Message(format!("{} is out of range", key))
}
