//! Locally cached license state

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use steeple_core::{LicenseConfig, SettingsStore};

/// Date format of the persisted expiration value
pub const EXPIRATION_FORMAT: &str = "%Y-%m-%d";

/// Expiration sent by the store when it has no real date for the key
pub const SENTINEL_EXPIRATION: &str = "1970-01-01";

/// Expiration sent for licenses that never expire
pub const LIFETIME_EXPIRATION: &str = "lifetime";

/// Local license status
///
/// `Inactive` is never written; it is the absence of a stored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
    Active,
    Expired,
    #[default]
    Inactive,
}

impl LicenseStatus {
    /// Stored representation; `None` means the value is deleted
    pub fn as_stored(&self) -> Option<&'static str> {
        match self {
            Self::Active => Some("active"),
            Self::Expired => Some("expired"),
            Self::Inactive => None,
        }
    }

    /// Interpret a stored value; unknown and empty values are inactive
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("active") => Self::Active,
            Some("expired") => Self::Expired,
            _ => Self::Inactive,
        }
    }
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Active => "Active",
            Self::Expired => "Expired",
            Self::Inactive => "Inactive",
        };
        f.write_str(label)
    }
}

/// Status and expiration as cached in the settings store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalLicenseState {
    pub status: LicenseStatus,
    pub expiration: Option<NaiveDate>,
}

impl LocalLicenseState {
    /// Read the cached state for an integration
    pub fn load<S: SettingsStore + ?Sized>(
        store: &S,
        config: &LicenseConfig,
    ) -> steeple_core::Result<Self> {
        let status = store.get(&config.option_name("status"))?;
        let expiration = store
            .get(&config.option_name("expiration"))?
            .and_then(|value| NaiveDate::parse_from_str(value.trim(), EXPIRATION_FORMAT).ok());

        Ok(Self {
            status: LicenseStatus::from_stored(status.as_deref()),
            expiration,
        })
    }

    /// Write the cached state, deleting values that are absent
    pub fn save<S: SettingsStore + ?Sized>(
        &self,
        store: &mut S,
        config: &LicenseConfig,
    ) -> steeple_core::Result<()> {
        let status_key = config.option_name("status");
        match self.status.as_stored() {
            Some(value) => store.set(&status_key, value)?,
            None => store.delete(&status_key)?,
        }

        let expiration_key = config.option_name("expiration");
        match self.expiration {
            Some(date) => store.set(
                &expiration_key,
                &date.format(EXPIRATION_FORMAT).to_string(),
            )?,
            None => store.delete(&expiration_key)?,
        }

        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == LicenseStatus::Active
    }

    pub fn is_expired(&self) -> bool {
        self.status == LicenseStatus::Expired
    }

    pub fn is_inactive(&self) -> bool {
        self.status == LicenseStatus::Inactive
    }
}

/// What a remote `expires` value means for the cached expiration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteExpiration {
    /// A real calendar date replaces the cached one
    Date(NaiveDate),
    /// `lifetime`: the license never expires, so the cached date is cleared
    Lifetime,
    /// Sentinel, empty, or unparseable: the cached date is left alone
    Unknown,
}

impl RemoteExpiration {
    /// Apply to the cached expiration
    pub fn merge(self, current: Option<NaiveDate>) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(date),
            Self::Lifetime => None,
            Self::Unknown => current,
        }
    }

    pub fn date(self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(date),
            _ => None,
        }
    }
}

/// Interpret a remote `expires` value
///
/// The store sends `YYYY-MM-DD HH:MM:SS`, `lifetime`, or the sentinel epoch
/// date. Only the date part before the first space is read.
pub fn parse_remote_expiration(raw: &str) -> RemoteExpiration {
    let date_part = raw.split(' ').next().unwrap_or_default().trim();

    if date_part.eq_ignore_ascii_case(LIFETIME_EXPIRATION) {
        return RemoteExpiration::Lifetime;
    }

    if date_part.is_empty() || date_part == SENTINEL_EXPIRATION {
        return RemoteExpiration::Unknown;
    }

    NaiveDate::parse_from_str(date_part, EXPIRATION_FORMAT)
        .map(RemoteExpiration::Date)
        .unwrap_or(RemoteExpiration::Unknown)
}
