//! License manager
//!
//! Ties the store API client, the reconciliation rules, and the sync gate to
//! an injected settings store. Every operation runs within one request; the
//! clock is injectable so daily markers and expiry checks are testable.

use crate::client::{LicenseAction, LicenseClient, RemoteLicenseResponse};
use crate::error::{LicenseError, Result};
use crate::expiry::ExpirationData;
use crate::gate::{should_sync, sync_marker_ttl, AdminScreen, SYNC_MARKER};
use crate::notices::{build_notice, select_notice_kind, Notice, NoticeArgs, NoticeKind};
use crate::reconcile::{
    confirms_deactivation, reconcile, reconcile_activation, reconcile_deactivation,
};
use crate::status::LocalLicenseState;
use crate::summary::LicenseSummary;
use crate::update::{
    newer_release, update_cache_ttl, UpdateInfo, VersionResponse, GET_VERSION_ACTION,
    UPDATE_CACHE,
};
use chrono::{DateTime, Duration, Utc};
use steeple_core::{LicenseConfig, SettingsStore, TransientExt};
use tracing::{debug, info, warn};

/// Name of the one-shot activation result transient
pub const ACTIVATION_RESULT: &str = "license_activation_result";

/// Stored activation result meaning "failed"
const ACTIVATION_FAILED: &str = "fail";

/// Lifetime of the activation failure marker
pub fn activation_result_ttl() -> Duration {
    Duration::seconds(15)
}

/// License operations for one theme integration
pub struct LicenseManager<S: SettingsStore> {
    config: LicenseConfig,
    /// Absent until a store URL is configured
    client: Option<LicenseClient>,
    store: S,
    clock: fn() -> DateTime<Utc>,
}

impl<S: SettingsStore> LicenseManager<S> {
    /// Create a manager over a settings store
    ///
    /// Local operations work without a store URL; remote ones then fail with
    /// a configuration error.
    pub fn new(config: LicenseConfig, store: S) -> Result<Self> {
        let client = if config.store_url.trim().is_empty() {
            None
        } else {
            Some(LicenseClient::new(&config)?)
        };

        Ok(Self {
            config,
            client,
            store,
            clock: Utc::now,
        })
    }

    /// Replace the clock
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &LicenseConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn client(&self) -> Result<&LicenseClient> {
        self.client
            .as_ref()
            .ok_or_else(|| LicenseError::Config("store URL is not configured".into()))
    }

    // ------------------------------------------------------------------
    // Local state
    // ------------------------------------------------------------------

    /// The saved license key, trimmed; empty when none is saved
    pub fn license_key(&self) -> Result<String> {
        let key = self.store.get(&self.config.option_name(""))?;
        Ok(key.map(|k| k.trim().to_string()).unwrap_or_default())
    }

    /// Cached status and expiration
    pub fn state(&self) -> Result<LocalLicenseState> {
        Ok(LocalLicenseState::load(&self.store, &self.config)?)
    }

    /// Save a license key
    ///
    /// Replacing a non-empty key with a different one clears the cached
    /// status and expiration so the new key has to be activated. Returns
    /// whether that reset happened.
    pub fn save_key(&mut self, new_key: &str) -> Result<bool> {
        let new_key = new_key.trim();
        let old_key = self.license_key()?;

        let reset = !old_key.is_empty() && old_key != new_key;
        if reset {
            info!("License key changed; clearing cached status and expiration");
            self.store.delete(&self.config.option_name("status"))?;
            self.store.delete(&self.config.option_name("expiration"))?;
        }

        let key_name = self.config.option_name("");
        if new_key.is_empty() {
            self.store.delete(&key_name)?;
        } else {
            self.store.set(&key_name, new_key)?;
        }

        Ok(reset)
    }

    fn require_options_page(&self) -> Result<()> {
        if self.config.options_page {
            Ok(())
        } else {
            Err(LicenseError::Config(
                "the license page is disabled for this theme".into(),
            ))
        }
    }

    // ------------------------------------------------------------------
    // Remote operations
    // ------------------------------------------------------------------

    /// Remote license data for the saved key
    pub async fn check(&self) -> Result<RemoteLicenseResponse> {
        self.require_options_page()?;
        let key = self.license_key()?;
        self.client()?.call(LicenseAction::Check, &key).await
    }

    /// Remote status for the saved key; `None` when no answer was had
    pub async fn remote_status(&self) -> Option<String> {
        match self.check().await {
            Ok(response) => response.license.filter(|s| !s.is_empty()),
            Err(e) => {
                debug!("Remote status unavailable: {}", e);
                None
            }
        }
    }

    /// Activate the saved key for this site
    ///
    /// The key counts as activated when the store says `valid`, either in the
    /// activation answer or in a follow-up check. A rejected activation leaves
    /// a one-shot failure marker for the next license page render. Transport
    /// and parse failures leave everything untouched.
    pub async fn activate(&mut self) -> Result<LocalLicenseState> {
        self.require_options_page()?;
        let key = self.license_key()?;

        let response = self.client()?.call(LicenseAction::Activate, &key).await?;

        let fallback_valid = if response.is_valid() {
            false
        } else {
            self.remote_status().await.as_deref() == Some("valid")
        };

        let current = self.state()?;
        let (next, activated) = reconcile_activation(&current, &response, || fallback_valid);
        next.save(&mut self.store, &self.config)?;

        if activated {
            info!("License activated");
            return Ok(next);
        }

        let status = response.license.clone().unwrap_or_default();
        warn!("License activation rejected (status: {})", status);

        let now = self.now();
        self.store.set_transient(
            &self.config.transient_name(ACTIVATION_RESULT),
            ACTIVATION_FAILED,
            activation_result_ttl(),
            now,
        )?;

        Err(LicenseError::ActivationRejected { status })
    }

    /// Deactivate the saved key for this site
    pub async fn deactivate(&mut self) -> Result<LocalLicenseState> {
        self.require_options_page()?;
        let key = self.license_key()?;

        let response = self.client()?.call(LicenseAction::Deactivate, &key).await?;

        let confirmed = confirms_deactivation(&response);
        let fallback_inactive =
            !confirmed && self.remote_status().await.as_deref() == Some("inactive");

        let current = self.state()?;
        let next = reconcile_deactivation(&current, &response, || fallback_inactive);
        next.save(&mut self.store, &self.config)?;

        if next.is_inactive() && !current.is_inactive() {
            info!("License deactivated");
        }

        Ok(next)
    }

    /// Pull the remote status and expiration into the local cache
    ///
    /// Returns the new state, or `None` when no answer was had (no key,
    /// store unreachable, unreadable answer, license page disabled).
    pub async fn sync(&mut self) -> Result<Option<LocalLicenseState>> {
        if !self.config.options_page {
            return Ok(None);
        }

        let key = self.license_key()?;
        let response = match self.client()?.call(LicenseAction::Check, &key).await {
            Ok(response) => response,
            Err(e) if e.is_silent() => {
                match e {
                    LicenseError::NoKey => debug!("License sync skipped: no key"),
                    other => warn!("License sync failed, will retry later: {}", other),
                }
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let current = self.state()?;
        let next = reconcile(&current, &response);

        if next.status != current.status {
            info!(
                "License status synced: {} -> {}",
                current.status, next.status
            );
        }

        next.save(&mut self.store, &self.config)?;
        Ok(Some(next))
    }

    /// Sync if the gate allows it for this screen
    ///
    /// The daily marker is (re)written after every sync that runs, whether
    /// or not the store answered. Only settings store failures are returned;
    /// remote and configuration problems are logged. Returns whether a sync ran.
    pub async fn auto_sync(&mut self, screen: &AdminScreen) -> Result<bool> {
        if !self.config.options_page {
            return Ok(false);
        }

        let marker = self.config.transient_name(SYNC_MARKER);
        let now = self.now();
        let marker_present = self.store.get_transient(&marker, now)?.is_some();

        if !should_sync(screen, marker_present) {
            debug!("License sync not due on {}", screen);
            return Ok(false);
        }

        match self.sync().await {
            Ok(_) => {}
            Err(e @ LicenseError::Store(_)) => return Err(e),
            Err(e) => warn!("Automatic license sync failed: {}", e),
        }

        self.store.set_transient(&marker, "1", sync_marker_ttl(), now)?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Display
    // ------------------------------------------------------------------

    /// Consume the activation failure marker
    ///
    /// True on the first call after a rejected activation, false afterwards.
    pub fn take_activation_failure(&mut self) -> Result<bool> {
        let now = self.now();
        let result = self
            .store
            .take_transient(&self.config.transient_name(ACTIVATION_RESULT), now)?;
        Ok(result.as_deref() == Some(ACTIVATION_FAILED))
    }

    /// Activation error notice for the license page, shown once
    pub fn activation_error_notice(&mut self, screen: &AdminScreen) -> Result<Option<Notice>> {
        if *screen != AdminScreen::LicensePage {
            return Ok(None);
        }

        if !self.take_activation_failure()? {
            return Ok(None);
        }

        let args = self.notice_args(&self.expiration_data()?)?;
        Ok(build_notice(NoticeKind::ActivationError, &self.config, &args))
    }

    /// Expiration details for the cached state
    pub fn expiration_data(&self) -> Result<ExpirationData> {
        Ok(ExpirationData::new(
            &self.state()?,
            self.config.expiring_soon_days,
            self.now(),
        ))
    }

    /// Inactive, expired, or expiring-soon notice for a screen
    pub fn notice(&self, screen: &AdminScreen) -> Result<Option<Notice>> {
        let state = self.state()?;
        let data = ExpirationData::new(&state, self.config.expiring_soon_days, self.now());

        match select_notice_kind(screen, &state, &data) {
            Some(kind) => Ok(build_notice(kind, &self.config, &self.notice_args(&data)?)),
            None => Ok(None),
        }
    }

    fn notice_args(&self, data: &ExpirationData) -> Result<NoticeArgs> {
        Ok(NoticeArgs {
            license_page_url: self.config.license_page_url.clone(),
            item_name: self.config.item_name.clone(),
            expiration_date: data.expiration_date.clone(),
            renewal_url: self.renewal_url()?,
            renewal_info_url: self.config.renewal_info_url.clone(),
        })
    }

    /// License page status block
    pub fn summary(&self) -> Result<LicenseSummary> {
        let has_key = !self.license_key()?.is_empty();
        let state = self.state()?;
        let data = ExpirationData::new(&state, self.config.expiring_soon_days, self.now());

        Ok(LicenseSummary::new(
            has_key,
            state.status,
            &data,
            !self.config.renewal_url.trim().is_empty(),
            &self.config.options_page_message,
        ))
    }

    /// Renewal URL with `{license_key}` substituted; empty when not configured
    pub fn renewal_url(&self) -> Result<String> {
        let key = self.license_key()?;
        Ok(self.config.renewal_url.replace("{license_key}", &key))
    }

    // ------------------------------------------------------------------
    // Updates
    // ------------------------------------------------------------------

    /// Check the store for a newer theme release
    ///
    /// Answers are cached for twelve hours unless `force` is set. Returns
    /// `None` when updates are disabled or the installed version is current.
    pub async fn check_for_update(&mut self, force: bool) -> Result<Option<UpdateInfo>> {
        if !self.config.updates {
            debug!("Update checks disabled");
            return Ok(None);
        }

        let cache = self.config.transient_name(UPDATE_CACHE);
        let now = self.now();

        let cached = if force {
            None
        } else {
            self.store
                .get_transient(&cache, now)?
                .and_then(|raw| serde_json::from_str::<VersionResponse>(&raw).ok())
        };

        let response = match cached {
            Some(response) => {
                debug!("Using cached version information");
                response
            }
            None => {
                let key = self.license_key()?;
                let response: VersionResponse = self
                    .client()?
                    .request(
                        GET_VERSION_ACTION,
                        &key,
                        &[
                            ("version", self.config.version.as_str()),
                            ("author", self.config.author.as_str()),
                        ],
                    )
                    .await?;

                let encoded = serde_json::to_string(&response)?;
                self.store
                    .set_transient(&cache, &encoded, update_cache_ttl(), now)?;
                response
            }
        };

        Ok(newer_release(&self.config.version, &response))
    }
}
