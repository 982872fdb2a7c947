//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::domain::skills::ALL_CATEGORIES;

/// Environment variables checked for the project URL, in order
const URL_VARS: [&str; 2] = ["SKILLSWAP_SUPABASE_URL", "SUPABASE_URL"];

/// Environment variables checked for the anon key, in order
const ANON_KEY_VARS: [&str; 2] = ["SKILLSWAP_SUPABASE_ANON_KEY", "SUPABASE_ANON_KEY"];

/// SkillSwap configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip)]
    pub anon_key: Option<String>,
    pub timeout_secs: u64,
    pub skills_table: String,
    pub users_table: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub default_category: String,
    pub default_level: String,
}

/// Connection settings with env overrides applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendCredentials {
    pub url: String,
    pub anon_key: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            timeout_secs: 30,
            skills_table: "Skills".to_string(),
            users_table: "users".to_string(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_category: ALL_CATEGORIES.to_string(),
            default_level: String::new(),
        }
    }
}

impl BackendConfig {
    /// Resolve URL and anon key from the process environment
    pub fn credentials(&self) -> crate::Result<BackendCredentials> {
        self.credentials_from(|name| env::var(name).ok())
    }

    /// Resolve URL and anon key using the given variable lookup
    pub fn credentials_from<F>(&self, lookup: F) -> crate::Result<BackendCredentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.anon_key.is_some() {
            return Err(crate::Error::ConfigError(
                "The anon key must be provided via environment variables, not stored in configuration"
                    .to_string(),
            ));
        }

        let first_set = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(name))
                .find(|value| !value.trim().is_empty())
        };

        let url = first_set(&URL_VARS).or_else(|| self.url.clone());
        let anon_key = first_set(&ANON_KEY_VARS);

        match (url, anon_key) {
            (Some(url), Some(anon_key)) => Ok(BackendCredentials {
                url: url.trim_end_matches('/').to_string(),
                anon_key,
            }),
            (url, key) => {
                warn!(
                    url_set = url.is_some(),
                    anon_key_set = key.is_some(),
                    "Supabase URL and anon key are required; database operations will fail"
                );
                Err(crate::Error::ConfigError(
                    "Supabase URL and anon key are required".to_string(),
                ))
            }
        }
    }

    pub fn redacted_anon_key(&self) -> Option<String> {
        ANON_KEY_VARS
            .iter()
            .find_map(|name| env::var(name).ok())
            .map(|key| redact(&key))
    }
}

fn redact(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        "***".to_string()
    } else {
        let suffix: String = chars[chars.len() - 4..].iter().collect();
        format!("***{}", suffix)
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var("SKILLSWAP_CONFIG_DIR") {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("skillswap")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, or return defaults if it doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.backend.anon_key.is_some() {
            return Err(anyhow!(
                "The anon key must be provided via environment variables, not stored in configuration"
            ));
        }
        if self.backend.timeout_secs == 0 {
            return Err(anyhow!("backend.timeout_secs must be greater than zero"));
        }
        if let Some(url) = &self.backend.url {
            validate_url(url)?;
        }
        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "backend.url" => Ok(self
                .backend
                .url
                .clone()
                .unwrap_or_else(|| "(not set)".to_string())),
            "backend.timeout_secs" => Ok(self.backend.timeout_secs.to_string()),
            "backend.skills_table" => Ok(self.backend.skills_table.clone()),
            "backend.users_table" => Ok(self.backend.users_table.clone()),

            "listing.default_category" => Ok(self.listing.default_category.clone()),
            "listing.default_level" => Ok(self.listing.default_level.clone()),

            "backend.anon_key" | "anon_key" => match self.backend.redacted_anon_key() {
                Some(redacted) => Ok(redacted),
                None => Ok(
                    "(not set - use SKILLSWAP_SUPABASE_ANON_KEY or SUPABASE_ANON_KEY env var)"
                        .to_string(),
                ),
            },

            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `skillswap config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "backend.url" => {
                validate_url(value)?;
                self.backend.url = Some(value.trim_end_matches('/').to_string());
            }
            "backend.timeout_secs" => {
                let secs: u64 = value
                    .parse()
                    .with_context(|| format!("Invalid timeout_secs value: {}", value))?;
                if secs == 0 {
                    return Err(anyhow!("Timeout must be greater than zero"));
                }
                self.backend.timeout_secs = secs;
            }
            "backend.skills_table" | "backend.users_table" => {
                let name = value.trim();
                if name.is_empty() {
                    return Err(anyhow!("Table name cannot be empty"));
                }
                if key == "backend.skills_table" {
                    self.backend.skills_table = name.to_string();
                } else {
                    self.backend.users_table = name.to_string();
                }
            }

            "listing.default_category" => {
                self.listing.default_category = value.to_string();
            }
            "listing.default_level" => {
                self.listing.default_level = value.to_string();
            }

            "backend.anon_key" | "anon_key" => {
                return Err(anyhow!(
                    "The anon key cannot be stored in configuration. \
                     Set the SKILLSWAP_SUPABASE_ANON_KEY or SUPABASE_ANON_KEY environment variable instead."
                ));
            }

            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `skillswap config list` to see available keys.",
                    key
                ));
            }
        }
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        let keys = vec![
            "backend.url",
            "backend.anon_key",
            "backend.timeout_secs",
            "backend.skills_table",
            "backend.users_table",
            "listing.default_category",
            "listing.default_level",
        ];

        keys.into_iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}

fn validate_url(url: &str) -> anyhow::Result<()> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(anyhow!("Invalid backend URL: {}. Expected http:// or https://", url))
    }
}
