use std::path::PathBuf;

use crate::{
    error::{Result, WonderlandError},
    paths::get_default_data_dir,
};

pub const DATA_DIR_ENV: &str = "WONDERLAND_DATA_DIR";
pub const API_URL_ENV: &str = "WONDERLAND_API_URL";
pub const API_KEY_ENV: &str = "WONDERLAND_API_KEY";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backend {
    #[default]
    Fixtures,
    Hosted,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Fixtures => "fixtures",
            Backend::Hosted => "hosted",
        }
    }
}

#[derive(Clone, Debug)]
pub struct HostedConfig {
    pub base_url: String,
    pub api_key: String,
}

impl HostedConfig {
    /// Read URL and key from the environment; both are required
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: require_env(API_URL_ENV)?,
            api_key: require_env(API_KEY_ENV)?,
        })
    }
}

fn require_env(env_var: &str) -> Result<String> {
    std::env::var(env_var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| WonderlandError::MissingConfig {
            env_var: env_var.to_string(),
        })
}

/// Explicit flag wins, then the environment, then the platform data dir.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(get_default_data_dir)
}
