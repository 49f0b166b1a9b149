//! Handles settings for the application. Configuration is written in
//! `settings.toml`, with `PAISA_`-prefixed environment variables layered on
//! top.
//!
//! See `settings.toml` for the configuration.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

/// The authorization gate policy: a 4-digit PIN and an email allow-list.
/// An empty allow-list admits any provider-verified identity.
#[derive(Debug, Deserialize)]
pub struct Gate {
    pub pin: String,
    #[serde(default)]
    pub allowed_emails: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
    pub gate: Gate,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .add_source(Environment::with_prefix("PAISA").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
