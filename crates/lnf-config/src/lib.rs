//! # lnf-config
//!
//! Layered configuration loading for the lost-and-found catalog using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LNF_*` prefix, `__` as separator)
//! 2. Project-level `.lnf/config.toml`
//! 3. User-level `~/.config/lnf/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LNF_DATABASE__PATH` -> `database.path`,
//! `LNF_STORAGE__BUCKET` -> `storage.bucket`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use lnf_config::LnfConfig;
//!
//! let config = LnfConfig::load_with_dotenv().expect("config");
//! if config.storage.is_configured() {
//!     println!("images go to {}", config.storage.bucket);
//! }
//! ```

mod database;
mod error;
mod general;
mod storage;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LnfConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl LnfConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".lnf/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("LNF_").split("__"))
    }

    /// Reject settings the catalog cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.max_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.max_per_page".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.general.per_page == 0 || self.general.per_page > self.general.max_per_page {
            return Err(ConfigError::InvalidValue {
                field: "general.per_page".into(),
                reason: format!("must be between 1 and {}", self.general.max_per_page),
            });
        }
        Ok(())
    }

    /// The storage section, or `NotConfigured` when credentials are missing.
    pub fn require_storage(&self) -> Result<&StorageConfig, ConfigError> {
        if self.storage.is_configured() {
            Ok(&self.storage)
        } else {
            Err(ConfigError::NotConfigured {
                section: "storage".into(),
            })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lnf").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn default_config_loads() {
        let config = LnfConfig::default();
        assert_eq!(config.database.path, "lnf.db");
        assert!(!config.storage.is_configured());
        assert_eq!(config.general.per_page, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("LNF_DATABASE__PATH", ":memory:");
            jail.set_env("LNF_GENERAL__PER_PAGE", "25");
            jail.set_env("LNF_STORAGE__BUCKET", "campus-lnf");

            let config: LnfConfig = LnfConfig::figment().extract()?;
            assert!(config.database.is_in_memory());
            assert_eq!(config.general.per_page, 25);
            assert_eq!(config.storage.bucket, "campus-lnf");
            Ok(())
        });
    }

    #[test]
    fn project_toml_is_merged() {
        Jail::expect_with(|jail| {
            jail.create_dir(".lnf")?;
            jail.create_file(
                ".lnf/config.toml",
                r#"
                [general]
                per_page = 6

                [storage]
                region = "us-east-1"
                "#,
            )?;

            let config: LnfConfig = LnfConfig::figment().extract()?;
            assert_eq!(config.general.per_page, 6);
            assert_eq!(config.storage.region, "us-east-1");
            assert_eq!(config.storage.key_prefix, "items");
            Ok(())
        });
    }

    #[test]
    fn validate_rejects_oversized_page() {
        let mut config = LnfConfig::default();
        config.general.per_page = 500;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "general.per_page"));
    }

    #[test]
    fn require_storage_reports_missing_section() {
        let config = LnfConfig::default();
        assert!(matches!(
            config.require_storage(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }
}
