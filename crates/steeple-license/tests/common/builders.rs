//! Builders for test configs, managers, and store answers

use serde_json::{json, Map, Value};
use steeple_core::{LicenseConfig, MemoryStore, SettingsStore};
use steeple_license::LicenseManager;

use super::constants::*;

/// Config pointing at a mock store
pub fn test_config(store_url: &str) -> LicenseConfig {
    LicenseConfig {
        slug: TEST_SLUG.to_string(),
        site_url: TEST_SITE_URL.to_string(),
        store_url: store_url.to_string(),
        item_name: TEST_ITEM_NAME.to_string(),
        version: INSTALLED_VERSION.to_string(),
        author: "Steeple Themes".to_string(),
        renewal_url: "https://store.example.com/checkout/?edd_license_key={license_key}"
            .to_string(),
        renewal_info_url: "https://store.example.com/renewals".to_string(),
        ..Default::default()
    }
}

/// Manager over a fresh in-memory store, clock fixed at `morning`
pub fn unkeyed_manager(store_url: &str) -> LicenseManager<MemoryStore> {
    manager_with(test_config(store_url), MemoryStore::new())
}

/// Manager over a fresh in-memory store with a saved key
pub fn keyed_manager(store_url: &str) -> LicenseManager<MemoryStore> {
    let mut store = MemoryStore::new();
    store
        .set(&format!("{}_license_key", TEST_SLUG), TEST_KEY)
        .unwrap();
    manager_with(test_config(store_url), store)
}

pub fn manager_with(config: LicenseConfig, store: MemoryStore) -> LicenseManager<MemoryStore> {
    LicenseManager::new(config, store)
        .unwrap()
        .with_clock(morning)
}

/// Fluent builder for licensing API answers
#[derive(Debug, Clone, Default)]
pub struct LicenseAnswer {
    fields: Map<String, Value>,
}

impl LicenseAnswer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: &str) -> Self {
        self.fields.insert("license".into(), json!(status));
        self
    }

    pub fn expires(mut self, expires: &str) -> Self {
        self.fields.insert("expires".into(), json!(expires));
        self
    }

    pub fn success(mut self, success: bool) -> Self {
        self.fields.insert("success".into(), json!(success));
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

pub fn valid_answer(expires: &str) -> Value {
    LicenseAnswer::new()
        .success(true)
        .status("valid")
        .expires(expires)
        .build()
}

pub fn status_answer(status: &str) -> Value {
    LicenseAnswer::new().status(status).build()
}

pub fn version_answer(new_version: &str) -> Value {
    json!({
        "new_version": new_version,
        "stable_version": new_version,
        "name": TEST_ITEM_NAME,
        "slug": TEST_SLUG,
        "url": "https://store.example.com/changelog/",
        "package": "https://store.example.com/download/exodus.zip",
        "last_updated": "2027-02-01 10:00:00"
    })
}
