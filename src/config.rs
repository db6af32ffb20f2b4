//! Application configuration
//!
//! Defaults suit a local run; each field can be overridden from the
//! environment.

use std::path::PathBuf;

use crate::repository::DEFAULT_KEY;

pub const ENV_DATA_DIR: &str = "TODO_DATA_DIR";
pub const ENV_LOG_DIR: &str = "TODO_LOG_DIR";
pub const ENV_STORAGE_KEY: &str = "TODO_STORAGE_KEY";
pub const ENV_REQUIRE_DESCRIPTION: &str = "TODO_REQUIRE_DESCRIPTION";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Where storage files live
    pub data_dir: PathBuf,
    /// Where the rolling log lives
    pub log_dir: PathBuf,
    /// Storage key holding the list
    pub storage_key: String,
    /// Whether the creation form also needs a description
    pub require_description: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            log_dir: PathBuf::from("logs"),
            storage_key: DEFAULT_KEY.to_string(),
            require_description: true,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `TODO_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns
    ///
    /// Blank values are ignored; unparseable booleans keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get(ENV_LOG_DIR) {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(key) = get(ENV_STORAGE_KEY) {
            config.storage_key = key.trim().to_string();
        }
        if let Some(flag) = get(ENV_REQUIRE_DESCRIPTION) {
            match parse_bool(&flag) {
                Some(value) => config.require_description = value,
                None => log::warn!("Ignoring {}={:?}: not a boolean", ENV_REQUIRE_DESCRIPTION, flag),
            }
        }

        config
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
