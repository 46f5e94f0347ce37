//! Assertions on cached license state

use chrono::NaiveDate;
use steeple_core::SettingsStore;
use steeple_license::{LicenseManager, LicenseStatus};

use super::constants::*;

pub fn assert_status<S: SettingsStore>(manager: &LicenseManager<S>, expected: LicenseStatus) {
    let state = manager.state().unwrap();
    assert_eq!(
        state.status, expected,
        "Expected cached status {:?} but found {:?}",
        expected, state.status
    );
}

pub fn assert_expiration<S: SettingsStore>(
    manager: &LicenseManager<S>,
    expected: Option<(i32, u32, u32)>,
) {
    let expected = expected.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
    let state = manager.state().unwrap();
    assert_eq!(
        state.expiration, expected,
        "Expected cached expiration {:?} but found {:?}",
        expected, state.expiration
    );
}

/// Raw stored value of a `<slug>_license_key_*` option
pub fn stored_option<S: SettingsStore>(store: &S, append: &str) -> Option<String> {
    let name = if append.is_empty() {
        format!("{}_license_key", TEST_SLUG)
    } else {
        format!("{}_license_key_{}", TEST_SLUG, append)
    };
    store.get(&name).unwrap()
}
