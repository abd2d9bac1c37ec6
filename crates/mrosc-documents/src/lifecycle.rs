//! Document status classification and default expiry dates.
//!
//! Everything here is a pure function of its arguments. The current date is
//! always passed in by the caller.

use chrono::{Days, Months, NaiveDate};
use mrosc_common_config::ExpiryRule;
use mrosc_common_core::days_between;

use crate::types::{DocumentStatus, DocumentTypeConfig, TrackedDocument};

/// Days before expiry during which a document counts as expiring.
pub const EXPIRING_WINDOW_DAYS: i64 = 30;

/// Days per month under the flat expiry rule.
pub const DAYS_PER_MONTH: u64 = 30;

/// Classify a document against its type.
///
/// Types without validity are always [`DocumentStatus::Valid`]. Otherwise the
/// result depends only on the expiry date, see [`classify_expiry`].
/// [`DocumentStatus::Pending`] is never returned.
pub fn classify(
    document: &TrackedDocument,
    type_config: &DocumentTypeConfig,
    now: NaiveDate,
) -> DocumentStatus {
    if !type_config.has_validity {
        return DocumentStatus::Valid;
    }
    classify_expiry(document.expiry_date, now)
}

/// Classify by expiry date alone.
///
/// No expiry date means valid. Past dates are expired; today through
/// [`EXPIRING_WINDOW_DAYS`] days ahead is expiring.
pub fn classify_expiry(expiry_date: Option<NaiveDate>, now: NaiveDate) -> DocumentStatus {
    let Some(expiry) = expiry_date else {
        return DocumentStatus::Valid;
    };

    match days_between(now, expiry) {
        d if d < 0 => DocumentStatus::Expired,
        d if d <= EXPIRING_WINDOW_DAYS => DocumentStatus::Expiring,
        _ => DocumentStatus::Valid,
    }
}

/// Signed days from `now` until the document expires, if it has an expiry date.
pub fn days_until_expiry(document: &TrackedDocument, now: NaiveDate) -> Option<i64> {
    document.expiry_date.map(|expiry| days_between(now, expiry))
}

/// Default expiry pre-filled on upload: issue date plus 30 days per month of validity.
///
/// `None` when the type does not expire.
pub fn compute_default_expiry(
    type_config: &DocumentTypeConfig,
    issue_date: NaiveDate,
) -> Option<NaiveDate> {
    compute_expiry_with_rule(ExpiryRule::FlatThirtyDayMonths, type_config, issue_date)
}

/// Expiry date for `issue_date` under the given rule.
///
/// `None` when the type does not expire, has no validity period, or the
/// result falls outside the representable date range.
pub fn compute_expiry_with_rule(
    rule: ExpiryRule,
    type_config: &DocumentTypeConfig,
    issue_date: NaiveDate,
) -> Option<NaiveDate> {
    if !type_config.has_validity {
        return None;
    }
    let months = type_config.validity_months?;

    match rule {
        ExpiryRule::FlatThirtyDayMonths => {
            issue_date.checked_add_days(Days::new(u64::from(months) * DAYS_PER_MONTH))
        }
        ExpiryRule::CalendarMonths => issue_date.checked_add_months(Months::new(months)),
    }
}
