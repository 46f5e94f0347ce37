//! Expiration date display and expiring-soon classification

use crate::status::LocalLicenseState;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

/// Shown in place of a missing expiration date
pub const UNKNOWN_DATE: &str = "unknown date";

/// Display format for expiration dates ("March 5, 2027")
pub const DISPLAY_FORMAT: &str = "%B %-d, %Y";

/// Midnight UTC at the start of the expiration date
pub fn expiration_timestamp(expiration: NaiveDate) -> DateTime<Utc> {
    expiration.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// `now` shifted by `days`, saturating at the ends of the representable range
pub fn threshold_timestamp(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(if days >= 0 {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        })
}

/// Whether an unexpired license runs out within `threshold_days` of `now`
pub fn is_expiring_soon(
    expiration: Option<NaiveDate>,
    threshold_days: i64,
    is_expired: bool,
    now: DateTime<Utc>,
) -> bool {
    if is_expired {
        return false;
    }

    match expiration {
        Some(date) => expiration_timestamp(date) < threshold_timestamp(now, threshold_days),
        None => false,
    }
}

/// Human readable expiration, or `none_text` when there is no date
pub fn format_expiration(expiration: Option<NaiveDate>, none_text: &str) -> String {
    match expiration {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => none_text.to_string(),
    }
}

/// Expiration details derived from the cached state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpirationData {
    pub expiration: Option<NaiveDate>,
    /// Formatted date, or "unknown date"
    pub expiration_date: String,
    pub expiration_ts: Option<DateTime<Utc>>,
    pub expiring_soon_days: i64,
    pub expiring_soon_ts: DateTime<Utc>,
    pub expiring_soon: bool,
}

impl ExpirationData {
    pub fn new(state: &LocalLicenseState, expiring_soon_days: i64, now: DateTime<Utc>) -> Self {
        Self {
            expiration: state.expiration,
            expiration_date: format_expiration(state.expiration, UNKNOWN_DATE),
            expiration_ts: state.expiration.map(expiration_timestamp),
            expiring_soon_days,
            expiring_soon_ts: threshold_timestamp(now, expiring_soon_days),
            expiring_soon: is_expiring_soon(
                state.expiration,
                expiring_soon_days,
                state.is_expired(),
                now,
            ),
        }
    }
}
