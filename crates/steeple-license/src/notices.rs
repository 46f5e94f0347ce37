//! Admin license notices
//!
//! Which notice applies is a pure function of the cached license state; the
//! message comes from a configurable template with positional placeholders.

use crate::expiry::ExpirationData;
use crate::gate::AdminScreen;
use crate::status::LocalLicenseState;
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;
use steeple_core::LicenseConfig;

/// `%%`, `%N$s`, or `%s`
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%%|%(\d+)\$s|%s").expect("placeholder pattern is valid"));

/// License notice kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    ActivationError,
    Inactive,
    Expired,
    ExpiringSoon,
}

impl NoticeKind {
    /// Template configured for this kind
    pub fn template<'a>(&self, config: &'a LicenseConfig) -> &'a str {
        match self {
            Self::ActivationError => &config.activation_error_notice,
            Self::Inactive => &config.inactive_notice,
            Self::Expired => &config.expired_notice,
            Self::ExpiringSoon => &config.expiring_soon_notice,
        }
    }
}

/// A notice ready to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    /// Presentation class understood by the host admin
    pub class: &'static str,
    pub message: String,
}

/// Arguments substituted into notice templates, by position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeArgs {
    /// `%1$s`
    pub license_page_url: String,
    /// `%2$s`
    pub item_name: String,
    /// `%3$s`
    pub expiration_date: String,
    /// `%4$s`
    pub renewal_url: String,
    /// `%5$s`
    pub renewal_info_url: String,
}

impl NoticeArgs {
    fn as_slice(&self) -> [&str; 5] {
        [
            self.license_page_url.as_str(),
            self.item_name.as_str(),
            self.expiration_date.as_str(),
            self.renewal_url.as_str(),
            self.renewal_info_url.as_str(),
        ]
    }
}

/// Pick the notice for an overview screen
///
/// Order: active but expiring soon, then expired, then anything not active.
/// Screens other than the dashboard, themes, and updates views get none.
pub fn select_notice_kind(
    screen: &AdminScreen,
    state: &LocalLicenseState,
    expiration: &ExpirationData,
) -> Option<NoticeKind> {
    if !screen.is_overview() {
        return None;
    }

    if state.is_active() && expiration.expiring_soon {
        Some(NoticeKind::ExpiringSoon)
    } else if state.is_expired() {
        Some(NoticeKind::Expired)
    } else if !state.is_active() {
        Some(NoticeKind::Inactive)
    } else {
        None
    }
}

/// Render a notice; an empty template suppresses it
pub fn build_notice(kind: NoticeKind, config: &LicenseConfig, args: &NoticeArgs) -> Option<Notice> {
    let template = kind.template(config);
    if template.trim().is_empty() {
        return None;
    }

    Some(Notice {
        kind,
        class: "error",
        message: format_template(template, &args.as_slice()),
    })
}

/// Substitute `%N$s` (1-based position) and `%s` (next position) placeholders
///
/// `%%` yields a literal percent sign. Placeholders past the end of `args`
/// become empty.
pub fn format_template(template: &str, args: &[&str]) -> String {
    let mut next = 0usize;

    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            if &caps[0] == "%%" {
                return "%".to_string();
            }

            let index = match caps.get(1) {
                Some(position) => position
                    .as_str()
                    .parse::<usize>()
                    .ok()
                    .and_then(|p| p.checked_sub(1)),
                None => {
                    let index = next;
                    next += 1;
                    Some(index)
                }
            };

            index
                .and_then(|i| args.get(i))
                .map(|arg| arg.to_string())
                .unwrap_or_default()
        })
        .into_owned()
}
