//! Server configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `FINANCEAI_*` environment variables (`__` separates sections,
//! e.g. `FINANCEAI_STORAGE__BACKEND=sqlite`).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{info, warn};

/// File read when `FINANCEAI_CONFIG` is not set
const DEFAULT_CONFIG_FILE: &str = "financeai.toml";

/// Fallback variables for the Gemini key, checked in order
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_AI_API_KEY"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_path: String,
    /// Reject duplicate usernames, emails, slugs and newsletter addresses
    /// in the in-memory backend. SQLite always enforces them.
    pub enforce_unique: bool,
    /// Seed an `admin` user with this password at startup
    #[serde(default)]
    pub admin_password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Config {
    /// Load from `FINANCEAI_CONFIG` (or `financeai.toml`) and the process environment
    pub fn load() -> Result<Self> {
        let file = std::env::var("FINANCEAI_CONFIG").ok();
        let required = file.is_some();
        let path = file.unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
        info!("Loading configuration (file: {}, required: {})", path, required);

        let mut config = Self::build(Some((&path, required)), None)?;

        if config.ai.api_key.is_none() {
            config.ai.api_key = API_KEY_VARS
                .iter()
                .find_map(|var| std::env::var(var).ok())
                .filter(|key| !key.is_empty());
        }
        if config.ai.api_key.is_none() {
            warn!("No Gemini API key configured, AI routes will fail");
        }

        Ok(config)
    }

    /// Assemble the layers. `env` replaces the process environment when given.
    fn build(file: Option<(&str, bool)>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("server.bind_address", "0.0.0.0:5000")?
            .set_default("storage.backend", "memory")?
            .set_default("storage.database_path", "data/financeai.db")?
            .set_default("storage.enforce_unique", false)?
            .set_default("ai.model", "gemini-2.5-pro")?
            .set_default(
                "ai.base_url",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("ai.timeout_secs", 120)?;

        if let Some((path, required)) = file {
            builder = builder.add_source(
                config::File::new(path, config::FileFormat::Toml).required(required),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix("FINANCEAI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        builder
            .build()
            .context("Failed to assemble configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}
