//! Hierarchical configuration loader with precedence
//!
//! Loads license configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. Global config (~/.steeple/steeple.yaml), or an explicit file passed by the caller
//! 3. Environment variables (STEEPLE_* prefix)
//!
//! Files may be partial; their keys are layered over the embedded defaults.

use crate::error::{Error, Result};
use crate::types::LicenseConfig;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde_yaml_ng::Value;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

/// Name of the global configuration file inside the config directory
const CONFIG_FILE: &str = "steeple.yaml";

/// Name of the settings store file inside the config directory
const SETTINGS_FILE: &str = "settings.json";

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a new hierarchical config loader
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the standard config directory (~/.steeple)
    fn get_config_dir() -> Result<Utf8PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::invalid_config("Could not determine home directory"))?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|_| Error::invalid_config("Home directory is not valid UTF-8"))?;

        let config_dir = home.join(".steeple");

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        Ok(config_dir)
    }

    /// Load license configuration with hierarchical precedence
    ///
    /// When `explicit` is given it replaces the global config file and must exist.
    pub fn load_license_config(&self, explicit: Option<&Utf8Path>) -> Result<LicenseConfig> {
        let mut merged = Self::load_embedded_value("license-defaults.yaml")?;

        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::config_not_found(path.as_str()));
                }
                merged = Self::merge_values(merged, self.load_yaml_value(path)?);
            }
            None => {
                let global_path = self.config_dir.join(CONFIG_FILE);
                if global_path.exists() {
                    merged = Self::merge_values(merged, self.load_yaml_value(&global_path)?);
                }
            }
        }

        let config: LicenseConfig = serde_yaml_ng::from_value(merged)
            .map_err(|e| Error::invalid_config(format!("Invalid license configuration: {}", e)))?;

        self.apply_env_overrides(config)
    }

    /// Default location of the settings store
    pub fn settings_path(&self) -> Utf8PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Load an embedded configuration file as a YAML value
    fn load_embedded_value(filename: &str) -> Result<Value> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })
    }

    /// Load a YAML file and parse it into a value
    fn load_yaml_value(&self, path: &Utf8Path) -> Result<Value> {
        debug!("Loading configuration from {}", path);
        let content = fs::read_to_string(path)?;
        let value: Value = serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;

        match value {
            Value::Mapping(_) => Ok(value),
            // An empty file overrides nothing
            Value::Null => Ok(Value::Mapping(Default::default())),
            _ => Err(Error::invalid_config(format!(
                "{} must contain a mapping at the top level",
                path
            ))),
        }
    }

    /// Merge two YAML values (base keys are overridden by overlay keys)
    fn merge_values(base: Value, overlay: Value) -> Value {
        match (base, overlay) {
            (Value::Mapping(mut base), Value::Mapping(overlay)) => {
                for (key, value) in overlay {
                    let merged = match base.remove(&key) {
                        Some(existing) => Self::merge_values(existing, value),
                        None => value,
                    };
                    base.insert(key, merged);
                }
                Value::Mapping(base)
            }
            (_, overlay) => overlay,
        }
    }

    /// Apply environment variable overrides to license config
    fn apply_env_overrides(&self, mut config: LicenseConfig) -> Result<LicenseConfig> {
        if let Ok(val) = env::var("STEEPLE_SLUG") {
            config.slug = val;
        }

        if let Ok(val) = env::var("STEEPLE_SITE_URL") {
            config.site_url = val;
        }

        if let Ok(val) = env::var("STEEPLE_STORE_URL") {
            config.store_url = val;
        }

        if let Ok(val) = env::var("STEEPLE_ITEM_NAME") {
            config.item_name = val;
        }

        if let Ok(val) = env::var("STEEPLE_THEME_VERSION") {
            config.version = val;
        }

        if let Ok(val) = env::var("STEEPLE_UPDATES") {
            config.updates = val
                .parse()
                .map_err(|_| Error::invalid_config("STEEPLE_UPDATES must be true or false"))?;
        }

        if let Ok(val) = env::var("STEEPLE_EXPIRING_SOON_DAYS") {
            config.expiring_soon_days = val.parse().map_err(|_| {
                Error::invalid_config("STEEPLE_EXPIRING_SOON_DAYS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("STEEPLE_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = val.parse().map_err(|_| {
                Error::invalid_config("STEEPLE_REQUEST_TIMEOUT_SECS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("STEEPLE_RENEWAL_URL") {
            config.renewal_url = val;
        }

        Ok(config)
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_temp_loader() -> (HierarchicalConfigLoader, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_dir =
            Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("Invalid UTF-8 path");
        let loader = HierarchicalConfigLoader::with_dir(config_dir);
        (loader, temp_dir)
    }

    #[test]
    #[serial]
    fn test_load_license_config_defaults() {
        let (loader, _temp) = create_temp_loader();
        let config = loader.load_license_config(None).unwrap();
        assert_eq!(config, LicenseConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_license_config_from_global_file() {
        let (loader, _temp) = create_temp_loader();

        let config_content = r#"
slug: exodus
store-url: "https://store.example.com"
item-name: "Exodus"
expiring-soon-days: 14
"#;
        fs::write(loader.config_dir().join(CONFIG_FILE), config_content).unwrap();

        let config = loader.load_license_config(None).unwrap();
        assert_eq!(config.slug, "exodus");
        assert_eq!(config.store_url, "https://store.example.com");
        assert_eq!(config.item_name, "Exodus");
        assert_eq!(config.expiring_soon_days, 14);
        // Untouched keys keep their embedded defaults
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.license_page_url, "themes.php?page=theme-license");
    }

    #[test]
    #[serial]
    fn test_explicit_file_replaces_global_file() {
        let (loader, temp) = create_temp_loader();
        fs::write(loader.config_dir().join(CONFIG_FILE), "slug: global\n").unwrap();

        let explicit = Utf8PathBuf::from_path_buf(temp.path().join("custom.yaml")).unwrap();
        fs::write(&explicit, "item-name: Custom\n").unwrap();

        let config = loader.load_license_config(Some(&explicit)).unwrap();
        assert_eq!(config.slug, "theme");
        assert_eq!(config.item_name, "Custom");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let (loader, temp) = create_temp_loader();
        let missing = Utf8PathBuf::from_path_buf(temp.path().join("missing.yaml")).unwrap();

        let err = loader.load_license_config(Some(&missing)).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    #[serial]
    fn test_empty_file_keeps_defaults() {
        let (loader, _temp) = create_temp_loader();
        fs::write(loader.config_dir().join(CONFIG_FILE), "").unwrap();

        let config = loader.load_license_config(None).unwrap();
        assert_eq!(config.slug, "theme");
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        let (loader, _temp) = create_temp_loader();

        env::set_var("STEEPLE_STORE_URL", "https://env.example.com");
        env::set_var("STEEPLE_EXPIRING_SOON_DAYS", "45");
        env::set_var("STEEPLE_UPDATES", "false");

        let config = loader.load_license_config(None).unwrap();
        assert_eq!(config.store_url, "https://env.example.com");
        assert_eq!(config.expiring_soon_days, 45);
        assert!(!config.updates);

        env::remove_var("STEEPLE_STORE_URL");
        env::remove_var("STEEPLE_EXPIRING_SOON_DAYS");
        env::remove_var("STEEPLE_UPDATES");
    }

    #[test]
    #[serial]
    fn test_invalid_env_override_is_rejected() {
        let (loader, _temp) = create_temp_loader();

        env::set_var("STEEPLE_REQUEST_TIMEOUT_SECS", "soon");
        let result = loader.load_license_config(None);
        env::remove_var("STEEPLE_REQUEST_TIMEOUT_SECS");

        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_merge_values_overlay_wins() {
        let base: Value = serde_yaml_ng::from_str("a: 1\nb: 2\n").unwrap();
        let overlay: Value = serde_yaml_ng::from_str("b: 3\nc: 4\n").unwrap();

        let merged = HierarchicalConfigLoader::merge_values(base, overlay);
        let expected: Value = serde_yaml_ng::from_str("a: 1\nb: 3\nc: 4\n").unwrap();
        assert_eq!(merged, expected);
    }

    #[test]
    fn test_settings_path_inside_config_dir() {
        let (loader, _temp) = create_temp_loader();
        assert_eq!(
            loader.settings_path(),
            loader.config_dir().join("settings.json")
        );
    }
}
