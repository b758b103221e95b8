//! Application configuration loaded from environment variables.

use serde::Deserialize;

/// Default TCP port the HTTP dispatcher listens on. Overridable only via
/// the `--port` CLI flag, never from the environment.
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Database connection settings, each field independently overridable via
/// the matching `DATABASE_*` environment variable.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database server hostname.
    #[serde(default = "default_database_host")]
    pub database_host: String,

    /// Database server port.
    #[serde(default = "default_database_port")]
    pub database_port: u16,

    /// Database name.
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// Database user.
    #[serde(default = "default_database_user")]
    pub database_user: String,

    /// Database password, empty by default.
    #[serde(default)]
    pub database_password: String,
}

fn default_database_host() -> String {
    "postgres-service.default.svc.cluster.local".to_string()
}

fn default_database_port() -> u16 {
    5432
}

fn default_database_name() -> String {
    "postgres".to_string()
}

fn default_database_user() -> String {
    "postgres".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.database_host.is_empty() {
            return Err("DATABASE_HOST must not be empty".to_string());
        }

        if self.database_port == 0 {
            return Err("DATABASE_PORT must not be 0".to_string());
        }

        if self.database_name.is_empty() {
            return Err("DATABASE_NAME must not be empty".to_string());
        }

        if self.database_user.is_empty() {
            return Err("DATABASE_USER must not be empty".to_string());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_host: default_database_host(),
            database_port: default_database_port(),
            database_name: default_database_name(),
            database_user: default_database_user(),
            database_password: String::new(),
        }
    }
}
