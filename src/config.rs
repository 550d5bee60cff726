use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "comanda.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Route origin for delivery map links.
    pub restaurant_address: String,
    pub default_address: String,
    pub default_phone: String,
    pub default_note: String,
    /// Enables the embeddable directions link when set.
    pub maps_api_key: Option<String>,
}

impl Settings {
    pub fn load(config_path: &Option<String>) -> Result<Self, SettingsError> {
        let default = Self::default();

        if implicit_file_missing(config_path, DEFAULT_CONFIG_PATH) {
            warn!(
                "Config file {DEFAULT_CONFIG_PATH} not found. Using default configuration with COMANDA_* environment overrides."
            );
        }

        match Self::load_from_file(config_path) {
            Ok(settings) => Ok(settings),
            Err(err) if config_path.is_none() => {
                warn!("Could not read config file: {err}. Using default configuration.",);
                Ok(default)
            }
            Err(err) => Err(err),
        }
    }

    fn load_from_file(config_path: &Option<String>) -> Result<Self, SettingsError> {
        let path = config_path.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let config = Config::builder()
            .add_source(File::with_name(path).required(config_path.is_some()))
            .add_source(
                Environment::with_prefix("COMANDA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        Ok(config)
    }
}

/// True when no path was given and the default file is absent.
fn implicit_file_missing(config_path: &Option<String>, default_path: &str) -> bool {
    config_path.is_none() && !Path::new(default_path).exists()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            restaurant_address: "Calle 78a # 62 - 48, Bogotá, Colombia".to_string(),
            default_address: "Calle 100 # 13 - 55, Bogotá, Colombia".to_string(),
            default_phone: "No disponible".to_string(),
            default_note: "Sin observaciones".to_string(),
            maps_api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "default_phone = \"3000000000\"").unwrap();
        writeln!(file, "maps_api_key = \"test-key\"").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let settings = Settings::load(&Some(path)).unwrap();

        assert_eq!(settings.default_phone, "3000000000");
        assert_eq!(settings.maps_api_key.as_deref(), Some("test-key"));
        assert_eq!(settings.default_note, "Sin observaciones");
    }

    #[test]
    fn single_underscore_environment_overrides_apply() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "default_phone = \"3000000000\"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        // SAFETY: no other test reads or writes this variable.
        unsafe { std::env::set_var("COMANDA_RESTAURANT_ADDRESS", "Carrera 7 # 32 - 16") };
        let settings = Settings::load(&Some(path));
        unsafe { std::env::remove_var("COMANDA_RESTAURANT_ADDRESS") };

        let settings = settings.unwrap();
        assert_eq!(settings.restaurant_address, "Carrera 7 # 32 - 16");
        assert_eq!(settings.default_phone, "3000000000");
    }

    #[test]
    fn absent_default_file_is_reported_only_without_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("comanda.toml");
        let missing = missing.to_str().unwrap();
        assert!(implicit_file_missing(&None, missing));
        assert!(!implicit_file_missing(&Some(missing.to_string()), missing));

        let present = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        assert!(!implicit_file_missing(&None, present.path().to_str().unwrap()));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml").to_str().unwrap().to_string();
        assert!(Settings::load(&Some(path)).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "default_phone = [").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        assert!(Settings::load(&Some(path)).is_err());
    }
}
