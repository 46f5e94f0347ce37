//! CLI command implementations

pub mod license;
pub mod sermon;
pub mod update;
pub mod version;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use steeple_core::{HierarchicalConfigLoader, JsonFileStore};
use steeple_license::LicenseManager;
use tracing::debug;

/// Config and settings locations given on the command line
#[derive(Debug, Default, Clone)]
pub struct Paths {
    pub config: Option<Utf8PathBuf>,
    pub settings: Option<Utf8PathBuf>,
}

/// Load the license config and open the settings file
pub fn open_manager(paths: &Paths) -> Result<LicenseManager<JsonFileStore>> {
    let loader = HierarchicalConfigLoader::new().context("Failed to locate config directory")?;
    let config = loader
        .load_license_config(paths.config.as_deref())
        .context("Failed to load license configuration")?;

    let settings_path = paths
        .settings
        .clone()
        .unwrap_or_else(|| loader.settings_path());
    debug!("Using settings file {}", settings_path);
    let store = JsonFileStore::open(settings_path.clone())
        .with_context(|| format!("Failed to open settings file {}", settings_path))?;

    Ok(LicenseManager::new(config, store)?)
}
