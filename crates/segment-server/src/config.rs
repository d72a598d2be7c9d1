//! Server configuration

use anyhow::Context;
use segment_sdk::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Static page served on `GET /evaluate`
    pub test_page: PathBuf,

    /// Reject user fields outside the schema
    pub strict_records: bool,

    /// Default log filter when `RUST_LOG` is not set
    pub log_level: String,

    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            test_page: PathBuf::from("test.html"),
            strict_records: false,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `config/server.*`, `SEGMENT_*` variables and
    /// `PORT`, in increasing priority.
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(config::File::with_name("config/server").required(false))
            .add_source(config::Environment::with_prefix("SEGMENT"))
            .build()
            .context("Failed to read configuration")?;

        let mut server_config = Self::from_config(cfg)?;
        if let Ok(port) = std::env::var("PORT") {
            server_config.port = parse_port(&port)?;
        }
        Ok(server_config)
    }

    /// Deserialize from an already-built configuration
    pub fn from_config(cfg: config::Config) -> anyhow::Result<Self> {
        cfg.try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Engine settings derived from this configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new().strict_records(self.strict_records)
    }
}

fn parse_port(value: &str) -> anyhow::Result<u16> {
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid PORT value: {:?}", value))
}
