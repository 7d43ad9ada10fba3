//! Configuration loader
//!
//! Sources are merged in order, later ones overriding earlier ones:
//!
//! 1. [`ScanConfig::default()`]
//! 2. A TOML file: the explicit path, or the first default location found
//! 3. `SVCSCAN_*` environment variables, `__` separating nested keys
//!    (e.g. `SVCSCAN_CACHE__MODULE_CAPACITY=512`)

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use svcscan_domain::error::{Error, Result};

use crate::config::ScanConfig;
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Get the configured file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load and validate configuration from all sources
    pub fn load(&self) -> Result<ScanConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(ScanConfig::default()));

        match &self.config_path {
            Some(config_path) if config_path.exists() => {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            }
            Some(config_path) => log_config_loaded(config_path, false),
            None => {
                if let Some(default_path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&default_path));
                    log_config_loaded(&default_path, true);
                }
            }
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let config: ScanConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_scan_config(&config)?;
        Ok(config)
    }

    /// Write `config` as pretty TOML
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &ScanConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{}", DEFAULT_CONFIG_DIR))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate every configuration section
pub fn validate_scan_config(config: &ScanConfig) -> Result<()> {
    validate_cache_config(config)?;
    validate_parallelism_config(config)?;
    validate_discovery_config(config)?;
    parse_log_level(&config.logging.level)?;
    Ok(())
}

fn validate_cache_config(config: &ScanConfig) -> Result<()> {
    let cache = &config.cache;
    let capacities = [
        ("module_capacity", cache.module_capacity),
        ("type_capacity", cache.type_capacity),
        ("assignability_capacity", cache.assignability_capacity),
        ("interface_capacity", cache.interface_capacity),
    ];
    if let Some((name, _)) = capacities.iter().find(|(_, capacity)| *capacity == 0) {
        return Err(Error::configuration(format!("Cache {name} cannot be 0")));
    }
    Ok(())
}

fn validate_parallelism_config(config: &ScanConfig) -> Result<()> {
    if config.parallelism.max_workers == 0 {
        return Err(Error::configuration("Maximum worker count cannot be 0"));
    }
    Ok(())
}

fn validate_discovery_config(config: &ScanConfig) -> Result<()> {
    let discovery = &config.discovery;
    if discovery
        .system_prefixes
        .iter()
        .chain(&discovery.excluded_namespaces)
        .any(|prefix| prefix.trim().is_empty())
    {
        return Err(Error::configuration("Discovery prefixes cannot be blank"));
    }
    Ok(())
}
