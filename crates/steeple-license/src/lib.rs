//! Theme license handling for Steeple
//!
//! Provides:
//! - A client for the store's software licensing API (activate, deactivate, check, get_version)
//! - Reconciliation of the locally cached license status with the store's answer
//! - A once-daily sync gate, always open on the license page
//! - Expiring-soon classification and admin notice selection
//! - A license manager tying these to a settings store
//! - Theme update checks against the same store

pub mod client;
pub mod error;
pub mod expiry;
pub mod gate;
pub mod manager;
pub mod notices;
pub mod reconcile;
pub mod status;
pub mod summary;
pub mod update;

pub use client::{LicenseAction, LicenseClient, RemoteLicenseResponse};
pub use error::{LicenseError, Result};
pub use expiry::{format_expiration, is_expiring_soon, ExpirationData};
pub use gate::{should_sync, AdminScreen};
pub use manager::LicenseManager;
pub use notices::{format_template, Notice, NoticeKind};
pub use reconcile::reconcile;
pub use status::{LicenseStatus, LocalLicenseState, RemoteExpiration};
pub use summary::{LicenseButton, LicenseSummary};
pub use update::{UpdateInfo, VersionResponse};
