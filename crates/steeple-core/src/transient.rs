//! Short-lived settings entries
//!
//! A transient is a settings value with an expiry timestamp. Expired entries
//! read as absent and are purged on the read that notices them. The clock is
//! always passed in so callers and tests control "now".

use crate::error::Result;
use crate::store::SettingsStore;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix separating transients from plain settings
const TRANSIENT_PREFIX: &str = "_transient_";

/// A stored transient value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransientEntry {
    /// The stored value
    pub value: String,
    /// Instant after which the entry no longer exists
    pub expires_at: DateTime<Utc>,
}

impl TransientEntry {
    /// Create an entry that lives for `ttl` from `now`
    pub fn new(value: impl Into<String>, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at: now + ttl,
        }
    }

    /// Check if the entry has expired
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Remaining lifetime in seconds
    pub fn remaining_ttl(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

/// Transient operations available on every settings store
pub trait TransientExt: SettingsStore {
    /// Store `value` under `name` for `ttl`
    fn set_transient(
        &mut self,
        name: &str,
        value: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let entry = TransientEntry::new(value, ttl, now);
        let encoded = serde_json::to_string(&entry)?;
        self.set(&transient_key(name), &encoded)
    }

    /// Read a live transient, purging it if it has expired
    fn get_transient(&mut self, name: &str, now: DateTime<Utc>) -> Result<Option<String>> {
        let key = transient_key(name);
        let Some(raw) = self.get(&key)? else {
            return Ok(None);
        };

        match serde_json::from_str::<TransientEntry>(&raw) {
            Ok(entry) if !entry.is_expired(now) => Ok(Some(entry.value)),
            Ok(_) => {
                debug!("Transient {} expired", name);
                self.delete(&key)?;
                Ok(None)
            }
            Err(_) => {
                // Unreadable entries count as expired
                self.delete(&key)?;
                Ok(None)
            }
        }
    }

    /// Read and delete a transient in one call
    fn take_transient(&mut self, name: &str, now: DateTime<Utc>) -> Result<Option<String>> {
        let value = self.get_transient(name, now)?;
        if value.is_some() {
            self.delete(&transient_key(name))?;
        }
        Ok(value)
    }

    /// Delete a transient whether or not it is live
    fn delete_transient(&mut self, name: &str) -> Result<()> {
        self.delete(&transient_key(name))
    }
}

impl<S: SettingsStore + ?Sized> TransientExt for S {}

fn transient_key(name: &str) -> String {
    format!("{}{}", TRANSIENT_PREFIX, name)
}
