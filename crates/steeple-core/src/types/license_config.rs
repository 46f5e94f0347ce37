//! License integration configuration
//!
//! Describes how a theme talks to its store: where the store lives, which
//! download the license belongs to, and which notices to show the admin.

use serde::{Deserialize, Serialize};

/// Configuration for one licensed theme integration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LicenseConfig {
    /// Theme slug; prefixes every persisted settings key
    #[serde(default = "default_slug")]
    pub slug: String,

    /// Home URL of the site the license is activated for
    #[serde(default)]
    pub site_url: String,

    /// URL of the store running the software licensing API
    #[serde(default)]
    pub store_url: String,

    /// Download name in the store; must match exactly
    #[serde(default)]
    pub item_name: String,

    /// Installed theme version
    #[serde(default = "default_version")]
    pub version: String,

    /// Theme author
    #[serde(default)]
    pub author: String,

    /// Enable automatic update checks
    #[serde(default = "default_true")]
    pub updates: bool,

    /// Provide the license page (key entry, activation, sync)
    #[serde(default = "default_true")]
    pub options_page: bool,

    /// Optional message shown at the top of the license page
    #[serde(default)]
    pub options_page_message: String,

    /// Shown once on the license page after a rejected activation
    #[serde(default = "default_activation_error_notice")]
    pub activation_error_notice: String,

    /// Shown while the license is not active
    #[serde(default = "default_inactive_notice")]
    pub inactive_notice: String,

    /// Shown once the license has expired
    #[serde(default = "default_expired_notice")]
    pub expired_notice: String,

    /// Shown while an active license is close to its expiration date
    #[serde(default = "default_expiring_soon_notice")]
    pub expiring_soon_notice: String,

    /// Days before expiration at which a license counts as expiring soon
    #[serde(default = "default_expiring_soon_days")]
    pub expiring_soon_days: i64,

    /// Renewal (checkout) URL; `{license_key}` is replaced with the key
    #[serde(default)]
    pub renewal_url: String,

    /// URL with information about renewing
    #[serde(default)]
    pub renewal_info_url: String,

    /// Admin URL of the license page, used in notices
    #[serde(default = "default_license_page_url")]
    pub license_page_url: String,

    /// Timeout for store API requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            slug: default_slug(),
            site_url: String::new(),
            store_url: String::new(),
            item_name: String::new(),
            version: default_version(),
            author: String::new(),
            updates: true,
            options_page: true,
            options_page_message: String::new(),
            activation_error_notice: default_activation_error_notice(),
            inactive_notice: default_inactive_notice(),
            expired_notice: default_expired_notice(),
            expiring_soon_notice: default_expiring_soon_notice(),
            expiring_soon_days: default_expiring_soon_days(),
            renewal_url: String::new(),
            renewal_info_url: String::new(),
            license_page_url: default_license_page_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl LicenseConfig {
    /// Settings key for the license key, optionally suffixed
    ///
    /// `option_name("")` is `<slug>_license_key`, `option_name("status")` is
    /// `<slug>_license_key_status`.
    pub fn option_name(&self, append: &str) -> String {
        let mut name = format!("{}_license_key", self.slug);
        let append = append.trim_start_matches('_');
        if !append.is_empty() {
            name.push('_');
            name.push_str(append);
        }
        name
    }

    /// Transient key scoped to this integration
    pub fn transient_name(&self, name: &str) -> String {
        format!("{}_{}", self.slug, name)
    }
}

fn default_slug() -> String {
    "theme".to_string()
}
fn default_version() -> String {
    "0.0.0".to_string()
}
fn default_true() -> bool {
    true
}
fn default_activation_error_notice() -> String {
    "License key could not be activated.".to_string()
}
fn default_inactive_notice() -> String {
    "Theme License Inactive: Activate your theme license at %1$s to enable updates for the %2$s theme."
        .to_string()
}
fn default_expired_notice() -> String {
    "Theme License Expired: Renew your theme license at %1$s to re-enable updates for the %2$s theme (expired on %3$s)."
        .to_string()
}
fn default_expiring_soon_notice() -> String {
    "Theme License Expiring Soon: Renew your theme license at %1$s to continue receiving updates for the %2$s theme (expires on %3$s)."
        .to_string()
}
fn default_expiring_soon_days() -> i64 {
    30
}
fn default_license_page_url() -> String {
    "themes.php?page=theme-license".to_string()
}
fn default_request_timeout() -> u64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_names_use_slug() {
        let config = LicenseConfig {
            slug: "exodus".to_string(),
            ..Default::default()
        };

        assert_eq!(config.option_name(""), "exodus_license_key");
        assert_eq!(config.option_name("status"), "exodus_license_key_status");
        assert_eq!(
            config.option_name("_expiration"),
            "exodus_license_key_expiration"
        );
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: LicenseConfig =
            serde_yaml_ng::from_str("store-url: https://store.example.com\nitem-name: Exodus\n")
                .unwrap();

        assert_eq!(config.store_url, "https://store.example.com");
        assert_eq!(config.item_name, "Exodus");
        assert_eq!(config.expiring_soon_days, 30);
        assert_eq!(config.request_timeout_secs, 15);
        assert!(config.updates);
        assert!(config.options_page);
    }
}
