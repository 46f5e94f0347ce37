//! What the license page shows for the current state

use crate::expiry::{format_expiration, ExpirationData};
use crate::status::LicenseStatus;
use serde::Serialize;

/// Actions the license page offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseButton {
    Activate,
    Deactivate,
    Renew,
}

/// License page status block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseSummary {
    /// Whether a key has been saved; nothing else is shown without one
    pub has_key: bool,
    pub status: LicenseStatus,
    pub expiring_soon: bool,
    /// Shown only for active or expired licenses with a known date
    pub expiration: Option<String>,
    pub buttons: Vec<LicenseButton>,
    /// Optional message configured for the top of the page
    pub message: Option<String>,
}

impl LicenseSummary {
    /// Build the summary from cached state
    ///
    /// `renewal_available` is whether a renewal URL is configured.
    pub fn new(
        has_key: bool,
        status: LicenseStatus,
        expiration: &ExpirationData,
        renewal_available: bool,
        message: &str,
    ) -> Self {
        let message = Some(message.trim())
            .filter(|m| !m.is_empty())
            .map(String::from);

        if !has_key {
            return Self {
                has_key,
                status,
                expiring_soon: false,
                expiration: None,
                buttons: Vec::new(),
                message,
            };
        }

        let active_or_expired = matches!(status, LicenseStatus::Active | LicenseStatus::Expired);

        let expiration_display = expiration
            .expiration
            .filter(|_| active_or_expired)
            .map(|date| format_expiration(Some(date), ""));

        let mut buttons = Vec::new();
        match status {
            LicenseStatus::Active => buttons.push(LicenseButton::Deactivate),
            LicenseStatus::Inactive => buttons.push(LicenseButton::Activate),
            LicenseStatus::Expired => {}
        }
        if renewal_available && active_or_expired {
            buttons.push(LicenseButton::Renew);
        }

        Self {
            has_key,
            status,
            expiring_soon: status == LicenseStatus::Active && expiration.expiring_soon,
            expiration: expiration_display,
            buttons,
            message,
        }
    }

    /// Status line, e.g. "Active / Expiring Soon"
    pub fn status_label(&self) -> String {
        if self.expiring_soon {
            format!("{} / Expiring Soon", self.status)
        } else {
            self.status.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::LocalLicenseState;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn data(status: LicenseStatus, expiration: Option<NaiveDate>) -> ExpirationData {
        let now = Utc.with_ymd_and_hms(2027, 2, 20, 0, 0, 0).unwrap();
        ExpirationData::new(&LocalLicenseState { status, expiration }, 30, now)
    }

    #[test]
    fn test_no_key_shows_nothing() {
        let summary = LicenseSummary::new(
            false,
            LicenseStatus::Inactive,
            &data(LicenseStatus::Inactive, None),
            true,
            "",
        );
        assert!(summary.buttons.is_empty());
        assert_eq!(summary.expiration, None);
    }

    #[test]
    fn test_active_expiring_soon() {
        let expiration = NaiveDate::from_ymd_opt(2027, 3, 5);
        let summary = LicenseSummary::new(
            true,
            LicenseStatus::Active,
            &data(LicenseStatus::Active, expiration),
            true,
            "",
        );

        assert_eq!(summary.status_label(), "Active / Expiring Soon");
        assert_eq!(summary.expiration.as_deref(), Some("March 5, 2027"));
        assert_eq!(
            summary.buttons,
            vec![LicenseButton::Deactivate, LicenseButton::Renew]
        );
    }

    #[test]
    fn test_expired_only_offers_renewal() {
        let expiration = NaiveDate::from_ymd_opt(2027, 1, 5);
        let summary = LicenseSummary::new(
            true,
            LicenseStatus::Expired,
            &data(LicenseStatus::Expired, expiration),
            true,
            "",
        );
        assert_eq!(summary.status_label(), "Expired");
        assert_eq!(summary.buttons, vec![LicenseButton::Renew]);

        let summary = LicenseSummary::new(
            true,
            LicenseStatus::Expired,
            &data(LicenseStatus::Expired, expiration),
            false,
            "",
        );
        assert!(summary.buttons.is_empty());
    }

    #[test]
    fn test_inactive_hides_expiration() {
        let summary = LicenseSummary::new(
            true,
            LicenseStatus::Inactive,
            &data(LicenseStatus::Inactive, NaiveDate::from_ymd_opt(2028, 1, 1)),
            true,
            "  Enter the key from your receipt.  ",
        );
        assert_eq!(summary.expiration, None);
        assert_eq!(summary.buttons, vec![LicenseButton::Activate]);
        assert_eq!(
            summary.message.as_deref(),
            Some("Enter the key from your receipt.")
        );
    }
}
