//! Squad settings from environment variables (`.env` loaded by [`load_settings`]).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use squad_core::{Result, SquadError};
use training::{DEFAULT_TRAINED_AGENTS_DATA_FILE, DEFAULT_TRAINING_DATA_FILE};

use crate::retry::RetryScope;

pub const DEFAULT_MAX_RETRY_LIMIT: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct SquadSettings {
    pub max_retry_limit: u32,
    pub retry_scope: RetryScope,
    pub max_rpm: Option<u32>,
    pub training_data_file: PathBuf,
    pub trained_agents_data_file: PathBuf,
    pub log_file: Option<String>,
    pub train: bool,
}

impl Default for SquadSettings {
    fn default() -> Self {
        Self {
            max_retry_limit: DEFAULT_MAX_RETRY_LIMIT,
            retry_scope: RetryScope::default(),
            max_rpm: None,
            training_data_file: DEFAULT_TRAINING_DATA_FILE.into(),
            trained_agents_data_file: DEFAULT_TRAINED_AGENTS_DATA_FILE.into(),
            log_file: None,
            train: false,
        }
    }
}

impl SquadSettings {
    /// Load from environment variables. Set-but-invalid values are config errors.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let max_retry_limit = parse_var("MAX_RETRY_LIMIT", "a non-negative integer")?
            .unwrap_or(defaults.max_retry_limit);
        let retry_scope = match non_blank("RETRY_SCOPE") {
            Some(raw) => raw
                .parse::<RetryScope>()
                .map_err(|_| SquadError::invalid_env("RETRY_SCOPE", &raw, "agent or mission"))?,
            None => defaults.retry_scope,
        };
        let max_rpm = match parse_var::<u32>("MAX_RPM", "a positive integer")? {
            Some(0) => return Err(SquadError::invalid_env("MAX_RPM", "0", "a positive integer")),
            other => other,
        };
        let training_data_file = non_blank("TRAINING_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.training_data_file);
        let trained_agents_data_file = non_blank("TRAINED_AGENTS_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.trained_agents_data_file);
        let log_file = non_blank("LOG_FILE");
        let train = match non_blank("TRAIN") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| SquadError::invalid_env("TRAIN", &raw, "true or false"))?,
            None => defaults.train,
        };

        Ok(Self {
            max_retry_limit,
            retry_scope,
            max_rpm,
            training_data_file,
            trained_agents_data_file,
            log_file,
            train,
        })
    }
}

/// Loads `.env` (if present), then reads [`SquadSettings`] from the environment.
pub fn load_settings() -> Result<SquadSettings> {
    let _ = dotenvy::dotenv();
    SquadSettings::from_env()
}

fn non_blank(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_var<T: FromStr>(key: &str, expected: &str) -> Result<Option<T>> {
    non_blank(key)
        .map(|raw| {
            raw.parse()
                .map_err(|_| SquadError::invalid_env(key, &raw, expected))
        })
        .transpose()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
