//! Shared constants and fixed clocks

use chrono::{DateTime, TimeZone, Utc};

pub const TEST_SLUG: &str = "exodus";
pub const TEST_ITEM_NAME: &str = "Exodus Theme";
pub const TEST_SITE_URL: &str = "https://church.example.org";
pub const TEST_KEY: &str = "3f8a9c2e71b04d55a6e0c9d1f2b3a4c5";
pub const OTHER_KEY: &str = "b7e1d0c9a8f7e6d5c4b3a2918f7e6d5c";

pub const EXPIRES_FAR: &str = "2028-06-30 23:59:59";
pub const EXPIRES_SOON: &str = "2027-03-05 23:59:59";
pub const EXPIRES_PAST: &str = "2027-01-05 23:59:59";
pub const EXPIRES_SENTINEL: &str = "1970-01-01 00:00:00";

pub const INSTALLED_VERSION: &str = "1.3.0";
pub const NEWER_VERSION: &str = "1.4.0";

/// 2027-02-20 09:00 UTC
pub fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2027, 2, 20, 9, 0, 0).unwrap()
}

/// 2027-02-20 09:00:10 UTC, inside the activation marker lifetime
pub fn moments_later() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2027, 2, 20, 9, 0, 10).unwrap()
}

/// 2027-02-20 21:00 UTC, same day
pub fn evening() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2027, 2, 20, 21, 0, 0).unwrap()
}

/// 2027-02-21 09:30 UTC, more than a day after `morning`
pub fn next_day() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2027, 2, 21, 9, 30, 0).unwrap()
}
