//! Layered configuration: defaults → `~/.coastwatch/config.json` → environment.
//!
//! CLI flags are applied on top by the binary. A missing file is fine; an
//! unreadable or malformed one is an error.

use crate::error::{CoastwatchError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const ENV_HOST: &str = "COASTWATCH_HOST";
pub const ENV_PORT: &str = "COASTWATCH_PORT";
pub const ENV_OPENWEATHER_KEY: &str = "OPENWEATHER_API_KEY";
pub const ENV_NOAA_KEY: &str = "NOAA_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Enables live weather; without it readings are simulated.
    pub openweather_api_key: Option<String>,
    /// Enables live NOAA tide predictions near US West Coast stations.
    pub noaa_api_key: Option<String>,
    /// Location used when a request names none.
    pub default_location: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            openweather_api_key: None,
            noaa_api_key: None,
            default_location: "mumbai".into(),
        }
    }
}

impl Config {
    /// Load from `path` (or the default location) and apply the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        let mut config = Self::read_file(&path)?.unwrap_or_default();
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".coastwatch")
            .join("config.json")
    }

    fn read_file(path: &Path) -> Result<Option<Self>> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CoastwatchError::Io { path: path.to_path_buf(), source });
            }
        };
        serde_json::from_str(&data)
            .map(Some)
            .map_err(|source| CoastwatchError::ConfigParse { path: path.to_path_buf(), source })
    }

    /// Overlay environment variables, read through `var` so tests need not touch the real env.
    pub fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var(ENV_HOST).filter(|h| !h.is_empty()) {
            self.host = host;
        }
        if let Some(port) = var(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| CoastwatchError::Config(format!("{} must be a port number, got '{}'", ENV_PORT, port)))?;
        }
        if let Some(key) = var(ENV_OPENWEATHER_KEY).filter(|k| !k.trim().is_empty()) {
            self.openweather_api_key = Some(key);
        }
        if let Some(key) = var(ENV_NOAA_KEY).filter(|k| !k.trim().is_empty()) {
            self.noaa_api_key = Some(key);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
