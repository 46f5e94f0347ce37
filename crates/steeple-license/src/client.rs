//! Store software licensing API client
//!
//! Every call is a single GET against the configured store URL with the
//! action, key, item name, and site URL in the query string. Certificate
//! verification is disabled for these requests.

use crate::error::{LicenseError, Result};
use crate::status::{parse_remote_expiration, RemoteExpiration};
use chrono::NaiveDate;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use steeple_core::LicenseConfig;
use tracing::debug;
use url::Url;

/// Remote license actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseAction {
    Activate,
    Deactivate,
    Check,
}

impl LicenseAction {
    /// Value of the `edd_action` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activate => "activate_license",
            Self::Deactivate => "deactivate_license",
            Self::Check => "check_license",
        }
    }

    /// Parse an action name, accepting the short and API forms
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "activate" | "activate_license" => Some(Self::Activate),
            "deactivate" | "deactivate_license" => Some(Self::Deactivate),
            "check" | "check_license" => Some(Self::Check),
            _ => None,
        }
    }
}

impl fmt::Display for LicenseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// License data returned by the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteLicenseResponse {
    /// Remote status: valid, invalid, inactive, site_inactive, disabled,
    /// expired, deactivated, failed, ...
    #[serde(default, deserialize_with = "lenient_string")]
    pub license: Option<String>,

    /// `YYYY-MM-DD HH:MM:SS`, `lifetime`, or the sentinel epoch date
    #[serde(default, deserialize_with = "lenient_string")]
    pub expires: Option<String>,

    #[serde(default)]
    pub success: Option<bool>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub item_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_email: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub license_limit: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub site_count: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub activations_left: Option<String>,
}

impl RemoteLicenseResponse {
    /// Remote status, if any
    pub fn status(&self) -> Option<&str> {
        self.license.as_deref()
    }

    /// Whether the store reports the license as valid
    pub fn is_valid(&self) -> bool {
        self.status() == Some("valid")
    }

    /// Meaning of the `expires` field; absent reads as unknown
    pub fn expiration(&self) -> RemoteExpiration {
        self.expires
            .as_deref()
            .map(parse_remote_expiration)
            .unwrap_or(RemoteExpiration::Unknown)
    }

    /// Real expiration date, ignoring `lifetime` and the sentinel
    pub fn expiration_date(&self) -> Option<NaiveDate> {
        self.expiration().date()
    }
}

/// Accept strings and numbers; anything else (false, null, objects) is absent
pub(crate) fn lenient_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// HTTP client for the store's licensing API
#[derive(Debug, Clone)]
pub struct LicenseClient {
    http: reqwest::Client,
    store_url: Url,
    item_name: String,
    site_url: String,
}

impl LicenseClient {
    /// Build a client for an integration
    pub fn new(config: &LicenseConfig) -> Result<Self> {
        if config.store_url.trim().is_empty() {
            return Err(LicenseError::Config("store URL is not configured".into()));
        }

        let store_url = Url::parse(config.store_url.trim()).map_err(|e| {
            LicenseError::Config(format!("invalid store URL '{}': {}", config.store_url, e))
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .danger_accept_invalid_certs(true)
            .user_agent(format!(
                "steeple/{} ({})",
                env!("CARGO_PKG_VERSION"),
                config.site_url
            ))
            .build()
            .map_err(|e| LicenseError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            store_url,
            item_name: config.item_name.clone(),
            site_url: config.site_url.clone(),
        })
    }

    /// Call a license action for `key`
    ///
    /// An empty key short-circuits to [`LicenseError::NoKey`] without a request.
    pub async fn call(&self, action: LicenseAction, key: &str) -> Result<RemoteLicenseResponse> {
        let key = key.trim();
        if key.is_empty() {
            debug!("Skipping {}: no license key", action);
            return Err(LicenseError::NoKey);
        }

        self.request(action.as_str(), key, &[]).await
    }

    /// Issue an API request and decode the JSON answer
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        action: &str,
        key: &str,
        extra: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.request_url(action, key, extra);
        debug!("Calling license API: {} ({})", action, self.store_url);

        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(LicenseError::Unreachable(format!(
                "{} returned {}",
                action,
                response.status()
            )));
        }

        let body = response.text().await?;
        let data = serde_json::from_str(&body)?;
        Ok(data)
    }

    /// Full request URL with the query parameters applied
    pub fn request_url(&self, action: &str, key: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self.store_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("edd_action", action)
                .append_pair("license", key)
                .append_pair("item_name", &self.item_name)
                .append_pair("url", &self.site_url);
            for (name, value) in extra {
                query.append_pair(name, value);
            }
        }
        url
    }
}
