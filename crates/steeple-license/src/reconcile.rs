//! Local/remote license status reconciliation

use crate::client::RemoteLicenseResponse;
use crate::status::{LicenseStatus, LocalLicenseState};

/// Remote statuses that clear the local status
const REMOTE_INACTIVE: &[&str] = &["inactive", "site_inactive", "disabled"];

/// Deactivation answers that mean the key is no longer active for this site
const REMOTE_DEACTIVATED: &[&str] = &["deactivated", "disabled", "failed"];

/// Apply a check response to the cached state
///
/// | remote | local |
/// |---|---|
/// | valid | active |
/// | inactive, site_inactive, disabled | inactive |
/// | expired | expired |
/// | anything else or absent | unchanged |
///
/// A real expiration date in the response always replaces the cached one and
/// `lifetime` clears it. The sentinel epoch date leaves it untouched.
pub fn reconcile(current: &LocalLicenseState, remote: &RemoteLicenseResponse) -> LocalLicenseState {
    let status = match remote.status() {
        Some("valid") => LicenseStatus::Active,
        Some(s) if REMOTE_INACTIVE.contains(&s) => LicenseStatus::Inactive,
        Some("expired") => LicenseStatus::Expired,
        _ => current.status,
    };

    LocalLicenseState {
        status,
        expiration: merge_expiration(current, remote),
    }
}

/// Cached state after an activate request
///
/// `fallback_valid` is the outcome of a follow-up check, consulted only when
/// the activation answer itself is not `valid`. The returned flag is false
/// when the activation was rejected, in which case the status is unchanged.
pub fn reconcile_activation(
    current: &LocalLicenseState,
    remote: &RemoteLicenseResponse,
    fallback_valid: impl FnOnce() -> bool,
) -> (LocalLicenseState, bool) {
    let activated = remote.is_valid() || fallback_valid();

    let status = if activated {
        LicenseStatus::Active
    } else {
        current.status
    };

    (
        LocalLicenseState {
            status,
            expiration: merge_expiration(current, remote),
        },
        activated,
    )
}

/// Cached state after a deactivate request
///
/// The local status is cleared when the store confirms deactivation, or when
/// a follow-up check (consulted only if needed) reports the key inactive.
pub fn reconcile_deactivation(
    current: &LocalLicenseState,
    remote: &RemoteLicenseResponse,
    fallback_inactive: impl FnOnce() -> bool,
) -> LocalLicenseState {
    let confirmed = confirms_deactivation(remote) || fallback_inactive();

    let status = if confirmed {
        LicenseStatus::Inactive
    } else {
        current.status
    };

    LocalLicenseState {
        status,
        expiration: merge_expiration(current, remote),
    }
}

/// Whether a deactivate answer by itself confirms the key is off this site
pub fn confirms_deactivation(remote: &RemoteLicenseResponse) -> bool {
    remote
        .status()
        .is_some_and(|s| REMOTE_DEACTIVATED.contains(&s))
}

fn merge_expiration(
    current: &LocalLicenseState,
    remote: &RemoteLicenseResponse,
) -> Option<chrono::NaiveDate> {
    remote.expiration().merge(current.expiration)
}
