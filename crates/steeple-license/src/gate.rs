//! When the cached license status may be synchronized with the store

use chrono::Duration;
use std::fmt;
use std::str::FromStr;

/// Lifetime of the once-daily sync marker
pub const SYNC_MARKER_TTL_HOURS: i64 = 24;

/// Name of the once-daily sync marker transient
pub const SYNC_MARKER: &str = "license_auto_sync";

/// Marker lifetime as a duration
pub fn sync_marker_ttl() -> Duration {
    Duration::hours(SYNC_MARKER_TTL_HOURS)
}

/// Admin view the current request renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminScreen {
    Dashboard,
    Themes,
    UpdateCore,
    /// The dedicated license page
    LicensePage,
    Other(String),
}

impl AdminScreen {
    /// Screen identifier as used by the host admin
    pub fn id(&self) -> &str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Themes => "themes",
            Self::UpdateCore => "update-core",
            Self::LicensePage => "appearance_page_theme-license",
            Self::Other(id) => id,
        }
    }

    /// Views where license notices are shown and daily syncs run
    pub fn is_overview(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Themes | Self::UpdateCore)
    }
}

impl FromStr for AdminScreen {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "dashboard" => Self::Dashboard,
            "themes" => Self::Themes,
            "update-core" | "updates" => Self::UpdateCore,
            "appearance_page_theme-license" | "theme-license" | "license" => Self::LicensePage,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for AdminScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Decide whether a sync may run for this request
///
/// The license page always syncs. The dashboard, themes, and update views
/// sync only when no daily marker is live. Every other view never syncs.
pub fn should_sync(screen: &AdminScreen, marker_present: bool) -> bool {
    match screen {
        AdminScreen::LicensePage => true,
        s if s.is_overview() => !marker_present,
        _ => false,
    }
}
