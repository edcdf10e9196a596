//! Server configuration
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. `config/default.{toml,yaml,json}` (optional)
//! 3. The file passed via `--config` / `SYMON_CONFIG` (required when given)
//! 4. Environment variables `SYMON__<SECTION>__<KEY>`, e.g. `SYMON__SERVER__PORT=9000`
//!
//! A `.env` file in the working directory is loaded before the environment is read.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use anyhow::Context;
use config::{Environment, File};
use serde::{Deserialize, Serialize};
use symon_query::{QueryTranslator, DEFAULT_TAKE};

const ENV_PREFIX: &str = "SYMON";
const ENV_SEPARATOR: &str = "__";
const DEFAULT_CONFIG_FILE: &str = "config/default";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. Empty disables CORS headers.
    pub cors_origins: Vec<String>,
    pub max_request_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
            max_request_body_size: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for symon crates when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// `daily`, `hourly`, `minutely` or `never`.
    pub file_rotation: String,
    pub service_name: String,
    pub deployment_environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "logs".to_string(),
            file_prefix: "symon".to_string(),
            file_rotation: "daily".to_string(),
            service_name: "symon-server".to_string(),
            deployment_environment: "development".to_string(),
        }
    }
}

/// Paging defaults for list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Page size when `limit` is missing or not a number.
    pub default_limit: i64,
    /// Upper bound for `limit`. `None` leaves it uncapped.
    pub max_limit: Option<i64>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_TAKE,
            max_limit: Some(100),
        }
    }
}

impl QueryConfig {
    pub fn translator(&self) -> QueryTranslator {
        let translator = QueryTranslator::new().with_default_take(self.default_limit);
        match self.max_limit {
            Some(max) => translator.with_max_take(max),
            None => translator,
        }
    }
}

const FILE_ROTATIONS: &[&str] = &["daily", "hourly", "minutely", "never"];

impl Config {
    /// Load configuration, taking the optional file path from `SYMON_CONFIG`.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("SYMON_CONFIG").ok();
        Self::load_from(path.as_deref().map(Path::new))
    }

    /// Load configuration with an explicit extra config file.
    pub fn load_from(path: Option<&Path>) -> anyhow::Result<Self> {
        // A missing .env is not an error.
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            )
            .build()
            .context("Failed to read configuration sources")?;

        settings
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Check cross-field constraints the type system cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.host.trim().is_empty() {
            return Err("server.host must not be empty".to_string());
        }
        if self.server.port == 0 {
            return Err("server.port must be greater than 0".to_string());
        }
        if self.server.max_request_body_size == 0 {
            return Err("server.max_request_body_size must be greater than 0".to_string());
        }
        if !FILE_ROTATIONS.contains(&self.logging.file_rotation.as_str()) {
            return Err(format!(
                "logging.file_rotation must be one of {}, got '{}'",
                FILE_ROTATIONS.join(", "),
                self.logging.file_rotation
            ));
        }
        if self.query.default_limit <= 0 {
            return Err("query.default_limit must be greater than 0".to_string());
        }
        if let Some(max) = self.query.max_limit {
            if max < self.query.default_limit {
                return Err(format!(
                    "query.max_limit ({}) must not be below query.default_limit ({})",
                    max, self.query.default_limit
                ));
            }
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .with_context(|| format!("Invalid server.host '{}'", self.server.host))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}
