use crate::cli::Cli;
use crate::services::filter::Filter;
use crate::services::storage::{DisabledStore, FileKeyValueStore, KeyValueStore};
use crate::services::theme::DEFAULT_STORAGE_KEY;
use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub application_name: String,
    /// JSON seed list; the bundled fixture is used when unset.
    pub seed_path: Option<PathBuf>,
    pub theme_storage_key: String,
    /// Overrides the per-user storage file location.
    pub storage_path: Option<PathBuf>,
    pub default_filter: String,
    pub persist_theme: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            application_name: "Extensions".to_string(),
            seed_path: None,
            theme_storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_path: None,
            default_filter: Filter::All.key().to_string(),
            persist_theme: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppConfig {
    pub fn load(cli: &Cli) -> Result<Self, AppConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("application_name", defaults.application_name.clone())?
            .set_default("theme_storage_key", defaults.theme_storage_key.clone())?
            .set_default("default_filter", defaults.default_filter.clone())?
            .set_default("persist_theme", defaults.persist_theme)?;

        if let Some(profile) = &cli.profile {
            let profile_file_name = format!("extension-manager.{profile}.toml");
            if let Some(path) = Self::config_dir_path(&profile_file_name) {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        if let Some(config_path) = &cli.config {
            builder = builder.add_source(File::from(config_path.clone()).required(true));
        } else if let Some(path) = Self::config_dir_path("extension-manager.toml") {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder.add_source(Environment::with_prefix("EXTENSION_MANAGER").separator("__"));

        let built = builder.build()?;
        let mut config = built.try_deserialize::<AppConfig>()?;
        config.apply_cli(cli);
        Ok(config)
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(seed) = &cli.seed {
            self.seed_path = Some(seed.clone());
        }
        if cli.no_persist {
            self.persist_theme = false;
        }
    }

    pub fn initial_filter(&self) -> Filter {
        Filter::from_key(&self.default_filter)
    }

    pub fn open_store(&self) -> Box<dyn KeyValueStore> {
        if !self.persist_theme {
            return Box::new(DisabledStore);
        }

        match self
            .storage_path
            .clone()
            .or_else(FileKeyValueStore::default_path)
        {
            Some(path) => {
                log::debug!("theme storage at {}", path.display());
                Box::new(FileKeyValueStore::new(path))
            }
            None => {
                log::warn!("no storage directory available; theme will not persist");
                Box::new(DisabledStore)
            }
        }
    }

    fn config_dir_path(file_name: &str) -> Option<PathBuf> {
        ProjectDirs::from("com", "DigitalDataCo", "ExtensionManager")
            .map(|dirs| dirs.config_dir().join(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    #[test]
    fn config_file_and_flags_are_layered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            "application_name = \"My Extensions\"\ndefault_filter = \"inactive\"\nseed_path = \"from-file.json\"\n",
        )
        .unwrap();

        let cli = Cli::parse_from([
            "extension-manager",
            "--config",
            path.to_str().unwrap(),
            "--seed",
            "from-flag.json",
            "--no-persist",
        ]);
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.application_name, "My Extensions");
        assert_eq!(config.initial_filter(), Filter::Inactive);
        assert_eq!(config.seed_path, Some(PathBuf::from("from-flag.json")));
        assert!(!config.persist_theme);
        assert_eq!(config.theme_storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let cli = Cli::parse_from(["extension-manager", "--config", "/nonexistent/settings.toml"]);
        assert!(AppConfig::load(&cli).is_err());
    }

    #[test]
    fn unknown_default_filter_means_all() {
        let config = AppConfig {
            default_filter: "enabled".into(),
            ..AppConfig::default()
        };
        assert_eq!(config.initial_filter(), Filter::All);
    }

    #[test]
    fn store_respects_storage_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let config = AppConfig {
            storage_path: Some(path.clone()),
            ..AppConfig::default()
        };

        config.open_store().set("bem-theme", "dark").unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("dark"));
    }

    #[test]
    fn disabled_persistence_opens_disabled_store() {
        let config = AppConfig {
            persist_theme: false,
            ..AppConfig::default()
        };
        assert!(config.open_store().get("bem-theme").is_err());
    }
}
