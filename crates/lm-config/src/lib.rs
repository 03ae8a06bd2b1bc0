//! # lm-config
//!
//! Layered runtime settings: built-in defaults, then an optional TOML file,
//! then `LIVEMATE__SECTION__KEY` environment variables.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

/// Default location of the optional settings file.
pub const DEFAULT_CONFIG_PATH: &str = "config/livemate.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub log: LogSettings,
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Upper bound on request bodies
    pub body_limit_bytes: usize,
    /// Address visitors use to reach the board; shared in "post to X" links
    pub public_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Plain,
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive; `RUST_LOG` wins when set
    pub filter: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Settings {
    /// Reads `.env`, then layers defaults, the settings file and the environment.
    ///
    /// The file path comes from `LIVEMATE_CONFIG`, falling back to
    /// [`DEFAULT_CONFIG_PATH`]. A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        let path = std::env::var("LIVEMATE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let settings = defaults()?
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix("LIVEMATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Defaults overlaid with an inline TOML document.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let settings = defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("server.body_limit_bytes", 16 * 1024)?
        .set_default("server.public_url", "http://127.0.0.1:8080/")?
        .set_default("database.url", "sqlite:livemate.db")?
        .set_default("database.max_connections", 5)?
        .set_default("log.filter", "info")?
        .set_default("log.format", "plain")?
        .set_default("cors.allowed_origins", Vec::<String>::new())?)
}
