use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::auth::service::AuthConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub google: GoogleConfig,
    #[serde(default)]
    pub auth: AuthSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

/// Google Sign-In settings.
#[derive(Debug, Deserialize, Clone)]
pub struct GoogleConfig {
    /// OAuth client id; the expected audience of Google ID tokens
    pub client_id: String,
    #[serde(default = "default_tokeninfo_url")]
    pub tokeninfo_url: String,
    #[serde(default = "default_google_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    /// Bound on each store or identity-provider call made while authenticating
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            call_timeout_secs: default_call_timeout_secs(),
        }
    }
}

fn default_expiration_hours() -> i64 {
    AuthConfig::DEFAULT_TOKEN_VALIDITY_HOURS
}

fn default_tokeninfo_url() -> String {
    auth::GOOGLE_TOKENINFO_URL.to_string()
}

fn default_google_timeout_secs() -> u64 {
    5
}

fn default_call_timeout_secs() -> u64 {
    AuthConfig::DEFAULT_CALL_TIMEOUT.as_secs()
}

/// Unprefixed variables with `__` as the section separator, so
/// `JWT__SECRET` sets `jwt.secret`.
fn environment() -> Environment {
    Environment::default().separator("__")
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, GOOGLE__CLIENT_ID, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment())
            .build()?;

        configuration.try_deserialize()
    }

    /// Settings handed to the auth service at construction.
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::new(self.google.client_id.clone())
            .with_token_validity(chrono::Duration::hours(self.jwt.expiration_hours))
            .with_call_timeout(Duration::from_secs(self.auth.call_timeout_secs))
    }
}
