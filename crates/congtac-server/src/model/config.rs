//! Configuration management for the congtac server
//!
//! This module handles loading and accessing application configuration.

use std::time::Duration;

use clap::Parser;
use config::{Config, Environment};
use congtac_common::Lang;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use congtac_auth::model::DEFAULT_TOKEN_EXPIRE_SECONDS;

use super::constants::{
    DB_CONNECT_TIMEOUT_SECS, DB_MAX_CONNECTIONS, DB_MIN_CONNECTIONS, DB_URL,
    DEFAULT_DB_CONNECT_TIMEOUT_SECS, DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_DB_MIN_CONNECTIONS,
    DEFAULT_LANG, DEFAULT_SERVER_ADDRESS, DEFAULT_SERVER_CONTEXT_PATH, DEFAULT_SERVER_PORT,
    LOGS_LEVEL, LOGS_PATH, SERVER_ADDRESS, SERVER_CONTEXT_PATH, SERVER_PORT, TOKEN_EXPIRE_SECONDS,
    TOKEN_SECRET_KEY,
};

/// Command line arguments for the server
#[derive(Debug, Parser)]
#[command()]
struct Cli {
    #[arg(short = 'p', long = "port")]
    port: Option<u16>,
    #[arg(short = 'a', long = "address")]
    address: Option<String>,
    #[arg(long = "db-url", env = "DATABASE_URL")]
    database_url: Option<String>,
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new() -> Self {
        let args = Cli::parse();
        let mut config_builder = Config::builder()
            .add_source(
                Environment::with_prefix("congtac")
                    .separator(".")
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("conf/application.yml"));

        if let Some(v) = args.port {
            config_builder = config_builder
                .set_override(SERVER_PORT, v)
                .expect("Failed to set server port override");
        }
        if let Some(v) = args.address {
            config_builder = config_builder
                .set_override(SERVER_ADDRESS, v)
                .expect("Failed to set server address override");
        }
        if let Some(v) = args.database_url {
            config_builder = config_builder
                .set_override(DB_URL, v)
                .expect("Failed to set database URL override");
        }

        let app_config = config_builder
            .build()
            .expect("Failed to build configuration - check conf/application.yml");

        Configuration { config: app_config }
    }

    /// Build a configuration from an already-assembled `Config` (tests)
    pub fn from_config(config: Config) -> Self {
        Configuration { config }
    }

    // ========================================================================
    // Server
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string(SERVER_ADDRESS)
            .unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int(SERVER_PORT)
            .map(|v| v as u16)
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    pub fn server_context_path(&self) -> String {
        self.config
            .get_string(SERVER_CONTEXT_PATH)
            .unwrap_or_else(|_| DEFAULT_SERVER_CONTEXT_PATH.to_string())
    }

    // ========================================================================
    // Auth
    // ========================================================================

    pub fn token_secret_key(&self) -> String {
        self.config
            .get_string(TOKEN_SECRET_KEY)
            .unwrap_or_default()
    }

    pub fn auth_token_expire_seconds(&self) -> i64 {
        self.config
            .get_int(TOKEN_EXPIRE_SECONDS)
            .unwrap_or(DEFAULT_TOKEN_EXPIRE_SECONDS)
    }

    // ========================================================================
    // Locale
    // ========================================================================

    pub fn default_lang(&self) -> Lang {
        self.config
            .get_string(DEFAULT_LANG)
            .map(|code| Lang::from_code(&code))
            .unwrap_or_default()
    }

    // ========================================================================
    // Logging
    // ========================================================================

    pub fn logs_path(&self) -> String {
        self.config
            .get_string(LOGS_PATH)
            .unwrap_or_else(|_| "logs".to_string())
    }

    pub fn logs_level(&self) -> String {
        self.config
            .get_string(LOGS_LEVEL)
            .unwrap_or_else(|_| "info".to_string())
    }

    // ========================================================================
    // Database
    // ========================================================================

    pub async fn database_connection(&self) -> anyhow::Result<DatabaseConnection> {
        let url = self
            .config
            .get_string(DB_URL)
            .map_err(|_| anyhow::anyhow!("db.url is not configured"))?;

        let mut options = ConnectOptions::new(url);
        options
            .max_connections(
                self.config
                    .get_int(DB_MAX_CONNECTIONS)
                    .map(|v| v as u32)
                    .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            )
            .min_connections(
                self.config
                    .get_int(DB_MIN_CONNECTIONS)
                    .map(|v| v as u32)
                    .unwrap_or(DEFAULT_DB_MIN_CONNECTIONS),
            )
            .connect_timeout(Duration::from_secs(
                self.config
                    .get_int(DB_CONNECT_TIMEOUT_SECS)
                    .map(|v| v as u64)
                    .unwrap_or(DEFAULT_DB_CONNECT_TIMEOUT_SECS),
            ))
            .sqlx_logging(false);

        let db = Database::connect(options).await?;

        Ok(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_configuration() -> Configuration {
        let config = Config::builder()
            .set_override(SERVER_PORT, 9090)
            .unwrap()
            .set_override(DEFAULT_LANG, "en")
            .unwrap()
            .build()
            .unwrap();
        Configuration::from_config(config)
    }

    #[test]
    fn test_defaults() {
        let configuration = Configuration::from_config(Config::default());
        assert_eq!(configuration.server_address(), DEFAULT_SERVER_ADDRESS);
        assert_eq!(configuration.server_port(), DEFAULT_SERVER_PORT);
        assert_eq!(configuration.server_context_path(), "/api");
        assert_eq!(
            configuration.auth_token_expire_seconds(),
            DEFAULT_TOKEN_EXPIRE_SECONDS
        );
        assert_eq!(configuration.default_lang(), Lang::Vi);
    }

    #[test]
    fn test_overrides() {
        let configuration = test_configuration();
        assert_eq!(configuration.server_port(), 9090);
        assert_eq!(configuration.default_lang(), Lang::En);
    }
}
