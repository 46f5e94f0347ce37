//! # steeple-core
//!
//! Core library for Steeple providing:
//! - License integration configuration (steeple.yaml) with hierarchical loading
//! - A key-value settings store abstraction with in-memory and JSON file backends
//! - Short-lived transient entries layered on top of any settings store

pub mod config;
pub mod error;
pub mod store;
pub mod transient;
pub mod types;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
pub use transient::{TransientEntry, TransientExt};
pub use types::LicenseConfig;
