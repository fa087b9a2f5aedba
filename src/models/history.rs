use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Time window unit for history queries. Months and years are fixed-length
/// approximations (30 and 365 days); there is no calendar arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Days,
    Weeks,
    Months,
    Years,
    All,
}

impl TimeUnit {
    /// Cutoff timestamp for a window of `range` units ending at `now`.
    /// `All` has no cutoff. A window too large to represent has no cutoff
    /// either: it already covers every representable timestamp.
    pub fn cutoff(self, range: i64, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let window = match self {
            TimeUnit::Days => Duration::try_days(range),
            TimeUnit::Weeks => Duration::try_weeks(range),
            TimeUnit::Months => range.checked_mul(30).and_then(Duration::try_days),
            TimeUnit::Years => range.checked_mul(365).and_then(Duration::try_days),
            TimeUnit::All => None,
        }?;
        now.checked_sub_signed(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn day_and_week_windows() {
        let cutoff = TimeUnit::Days.cutoff(1, now()).unwrap();
        assert_eq!(now() - cutoff, Duration::hours(24));

        let cutoff = TimeUnit::Weeks.cutoff(2, now()).unwrap();
        assert_eq!(now() - cutoff, Duration::days(14));
    }

    #[test]
    fn months_and_years_are_fixed_length() {
        let cutoff = TimeUnit::Months.cutoff(1, now()).unwrap();
        assert_eq!(now() - cutoff, Duration::days(30));

        let cutoff = TimeUnit::Years.cutoff(1, now()).unwrap();
        assert_eq!(now() - cutoff, Duration::days(365));
    }

    #[test]
    fn all_has_no_cutoff() {
        assert_eq!(TimeUnit::All.cutoff(7, now()), None);
    }

    #[test]
    fn oversized_windows_have_no_cutoff() {
        assert_eq!(TimeUnit::Days.cutoff(i64::MAX, now()), None);
        assert_eq!(TimeUnit::Weeks.cutoff(i64::MAX, now()), None);
        assert_eq!(TimeUnit::Months.cutoff(i64::MAX, now()), None);
        assert_eq!(TimeUnit::Years.cutoff(i64::MAX / 300, now()), None);
        // Representable window reaching past the representable timeline
        assert_eq!(TimeUnit::Days.cutoff(i64::MAX / 86_400_000, now()), None);
    }

    #[test]
    fn unknown_unit_fails_deserialization() {
        assert!(serde_json::from_str::<TimeUnit>("\"fortnights\"").is_err());
        assert_eq!(
            serde_json::from_str::<TimeUnit>("\"days\"").unwrap(),
            TimeUnit::Days
        );
    }
}
