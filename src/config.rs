use std::env;
use std::fmt::{self, Debug, Formatter};

use thiserror::Error;

use crate::generator::prompts::PromptLocale;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings, read once from the environment at startup.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub locale: PromptLocale,
    pub db_max_connections: u32,
    pub workers: usize,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("bind_address", &self.bind_address)
            .field("gemini_api_key", &"[REDACTED]")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("locale", &self.locale)
            .field("db_max_connections", &self.db_max_connections)
            .field("workers", &self.workers)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let locale = match get("PLAN_LANGUAGE").as_deref() {
            None | Some("ka") => PromptLocale::georgian(),
            Some("en") => PromptLocale::english(),
            Some(other) => {
                return Err(ConfigError::Invalid { key: "PLAN_LANGUAGE", value: other.to_string() })
            }
        };

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", value: v })?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let workers = match get("WORKERS") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key: "WORKERS", value: v })?,
            None => num_cpus::get(),
        };

        Ok(Config {
            database_url: required("DATABASE_URL")?,
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            gemini_api_key: required("GEMINI_API_KEY")?,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            locale,
            db_max_connections,
            workers,
        })
    }
}
