//! Build information reported by `steeple version`

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub version: String,
    pub os: String,
    pub arch: String,
}

impl VersionInfo {
    /// Version and platform of the running binary.
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "steeple {} ({} {})", self.version, self.os, self.arch)
    }
}
