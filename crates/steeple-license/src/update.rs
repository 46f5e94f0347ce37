//! Theme update checks against the store's `get_version` action

use crate::client::lenient_string;
use chrono::Duration;
use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// API action returning the latest release of an item
pub const GET_VERSION_ACTION: &str = "get_version";

/// Name of the cached `get_version` answer
pub const UPDATE_CACHE: &str = "update_response";

/// How long a `get_version` answer is reused
pub fn update_cache_ttl() -> Duration {
    Duration::hours(12)
}

/// Latest release information returned by the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub new_version: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub stable_version: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,

    /// Changelog / details page
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub homepage: Option<String>,

    /// Download URL of the package; empty when the license is not valid
    #[serde(default, deserialize_with = "lenient_string")]
    pub package: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub last_updated: Option<String>,
}

/// An available update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateInfo {
    pub current_version: String,
    pub new_version: String,
    pub name: Option<String>,
    pub url: Option<String>,
    pub package: Option<String>,
}

/// Parse a version, padding missing components ("1.2" is "1.2.0")
pub fn lenient_version(raw: &str) -> Option<Version> {
    let raw = raw.trim().trim_start_matches('v');
    if let Ok(version) = Version::parse(raw) {
        return Some(version);
    }

    let mut parts = raw.split('.').map(|p| p.parse::<u64>().ok());
    let major = parts.next()??;
    let minor = parts.next().unwrap_or(Some(0))?;
    let patch = parts.next().unwrap_or(Some(0))?;
    if parts.next().is_some() {
        return None;
    }

    Some(Version::new(major, minor, patch))
}

/// The update described by `response`, if it is newer than `current`
pub fn newer_release(current: &str, response: &VersionResponse) -> Option<UpdateInfo> {
    let remote = response.new_version.as_deref()?;

    let (Some(current_version), Some(remote_version)) =
        (lenient_version(current), lenient_version(remote))
    else {
        debug!(
            "Cannot compare versions: installed '{}', remote '{}'",
            current, remote
        );
        return None;
    };

    if remote_version > current_version {
        info!("Update available: {} -> {}", current_version, remote_version);
        Some(UpdateInfo {
            current_version: current.to_string(),
            new_version: remote.to_string(),
            name: response.name.clone(),
            url: response.url.clone(),
            package: response.package.clone().filter(|p| !p.is_empty()),
        })
    } else {
        debug!("Already on latest version: {}", current_version);
        None
    }
}
