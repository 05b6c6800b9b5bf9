//! Expiry-date classification for the approaching-expiry badge.
//!
//! Pure calendar arithmetic: `days_left = expiry_date - today` at day
//! granularity, with "today" taken in the warehouse's fixed UTC+9 offset
//! so the badge flips at local midnight, not at UTC midnight.

use chrono::{Duration, NaiveDate, Utc};

/// Threshold used when no value has been configured.
pub const DEFAULT_EXPIRY_WARNING_DAYS: i32 = 100;

/// Fixed offset of the warehouse's local day, in hours east of UTC.
const LOCAL_OFFSET_HOURS: i64 = 9;

/// Badge state derived from an expiry date and the configured threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStatus {
    /// Past its expiry date
    Expired,
    /// Within the warning window, including expiring today
    Approaching,
    /// Outside the warning window; no badge
    Fresh,
}

/// Today's date in the warehouse's local day.
#[must_use]
pub fn local_today() -> NaiveDate {
    (Utc::now() + Duration::hours(LOCAL_OFFSET_HOURS)).date_naive()
}

/// Whole days from `today` until `expiry`; negative once expired.
#[must_use]
pub fn days_left(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

/// Classifies a days-left value against the warning threshold.
#[must_use]
pub const fn classify(days_left: i64, threshold: i32) -> ExpiryStatus {
    if days_left < 0 {
        ExpiryStatus::Expired
    } else if days_left <= threshold as i64 {
        ExpiryStatus::Approaching
    } else {
        ExpiryStatus::Fresh
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_left() {
        let today = date(2025, 3, 10);
        assert_eq!(days_left(date(2025, 3, 10), today), 0);
        assert_eq!(days_left(date(2025, 3, 11), today), 1);
        assert_eq!(days_left(date(2025, 3, 9), today), -1);
        assert_eq!(days_left(date(2026, 3, 10), today), 365);
    }

    #[test]
    fn test_classify_boundaries() {
        let threshold = 30;
        assert_eq!(classify(-1, threshold), ExpiryStatus::Expired);
        assert_eq!(classify(0, threshold), ExpiryStatus::Approaching);
        assert_eq!(classify(30, threshold), ExpiryStatus::Approaching);
        assert_eq!(classify(31, threshold), ExpiryStatus::Fresh);
    }

    #[test]
    fn test_classify_with_default_threshold() {
        assert_eq!(
            classify(100, DEFAULT_EXPIRY_WARNING_DAYS),
            ExpiryStatus::Approaching
        );
        assert_eq!(
            classify(101, DEFAULT_EXPIRY_WARNING_DAYS),
            ExpiryStatus::Fresh
        );
    }

    #[test]
    fn test_local_today_is_near_utc_today() {
        let utc_today = Utc::now().date_naive();
        let local = local_today();
        // UTC+9 is at most one calendar day ahead of UTC
        assert!((local - utc_today).num_days().abs() <= 1);
    }
}
