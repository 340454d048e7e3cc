//! age.rs
//!
//! Calendar-aware elapsed-time decomposition.
//!
//! Chrono does not provide a built-in year/month/day diff (unlike Python's
//! relativedelta), so we implement the calendar borrowing rules manually.
//!
//! This logic correctly handles:
//!   • month underflow (borrowing from years)
//!   • day underflow (borrowing from the months before `now`)
//!   • leap years
//!   • varying month lengths

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

/// Elapsed time since a reference date, decomposed several ways at once.
///
/// `years`/`months`/`days` are calendar-aligned remainders: adding them back
/// to the reference date in calendar arithmetic reconstructs `now` at day
/// granularity. `full_months` and `full_days` are totals in a single unit;
/// `minutes` and `seconds` count exact elapsed time since the reference
/// instant (UTC midnight of the reference date).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Breakdown {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub full_months: u32,
    pub full_days: u64,
    pub minutes: u64,
    pub seconds: u64,
}

/// Computes the elapsed-time breakdown for an ISO `YYYY-MM-DD` reference date.
///
/// Malformed input and future dates clamp to the all-zero breakdown instead
/// of failing; a subject with a bad date reads as zero until its
/// configuration is corrected.
pub fn compute_elapsed(reference_iso: &str, now: DateTime<Utc>) -> Breakdown {
    let Some(birth) = parse_iso_date(reference_iso) else {
        return Breakdown::default();
    };
    let birth_midnight = birth.and_time(NaiveTime::MIN).and_utc();
    if now < birth_midnight {
        return Breakdown::default();
    }

    let today = now.date_naive();

    let mut years = today.year() - birth.year();
    let mut months = today.month() as i32 - birth.month() as i32;
    let mut days = today.day() as i32 - birth.day() as i32;

    // Fix day underflow: borrow from the month before `now`, walking further
    // back when that month is shorter than the deficit (Jan 31 -> Mar 1 needs
    // two steps because February cannot cover 30 days).
    let (mut year, mut month) = (today.year(), today.month());
    while days < 0 {
        months -= 1;
        (year, month) = if month == 1 {
            (year - 1, 12)
        } else {
            (year, month - 1)
        };
        days += days_in_month(year, month) as i32;
    }

    // Fix month underflow
    if months < 0 {
        years -= 1;
        months += 12;
    }

    let full_months = years * 12 + months;

    // Whole days from midnight-to-midnight date arithmetic, so the value
    // never fluctuates with time-of-day.
    let full_days = (today - birth).num_days();

    let elapsed = now - birth_midnight;

    Breakdown {
        years: years as u32,
        months: months as u32,
        days: days as u32,
        full_months: full_months as u32,
        full_days: full_days as u64,
        minutes: elapsed.num_minutes() as u64,
        seconds: elapsed.num_seconds() as u64,
    }
}

fn parse_iso_date(iso: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d").ok()
}

/// Returns number of days in a given year/month (handles leap years)
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30, // should never occur but keeps function total
    }
}

/// Leap-year rule (Gregorian):
///   - divisible by 4 → leap year
///   - except divisible by 100 → not leap year
///   - except divisible by 400 → leap year
fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn same_instant_is_all_zero() {
        let age = compute_elapsed("2024-03-29", at(2024, 3, 29, 0, 0, 0));
        assert_eq!(age, Breakdown::default());
    }

    #[test]
    fn future_reference_clamps_to_zero() {
        let age = compute_elapsed("2024-03-29", at(2024, 3, 28, 23, 59, 59));
        assert_eq!(age, Breakdown::default());
    }

    #[test]
    fn malformed_reference_clamps_to_zero() {
        for bad in ["", "garbage", "2024-13-01", "2023-02-29", "29/03/2024"] {
            let age = compute_elapsed(bad, at(2025, 1, 1, 0, 0, 0));
            assert_eq!(age, Breakdown::default(), "input {bad:?}");
        }
    }

    #[test]
    fn plain_decomposition() {
        let age = compute_elapsed("2024-05-28", at(2025, 7, 4, 0, 0, 0));
        assert_eq!(age.years, 1);
        assert_eq!(age.months, 1);
        assert_eq!(age.days, 6);
        assert_eq!(age.full_months, 13);
        assert_eq!(age.full_days, 402);
    }

    #[test]
    fn day_borrow_crosses_year_boundary() {
        // Borrowing for Jan 5 reaches back into December of the prior year.
        let age = compute_elapsed("2023-12-31", at(2024, 1, 5, 0, 0, 0));
        assert_eq!(age.years, 0);
        assert_eq!(age.months, 0);
        assert_eq!(age.days, 5);
        assert_eq!(age.full_months, 0);
        assert_eq!(age.full_days, 5);
    }

    #[test]
    fn day_borrow_walks_past_short_february() {
        // Jan 31 -> Mar 1 of a leap year: February's 29 days cannot cover the
        // 30-day deficit, so the borrow walks one month further.
        let age = compute_elapsed("2024-01-31", at(2024, 3, 1, 0, 0, 0));
        assert_eq!(age.years, 0);
        assert_eq!(age.months, 0);
        assert_eq!(age.days, 30);
        assert_eq!(age.full_months, 0);
        assert_eq!(age.full_days, 30);
        assert_eq!(age.minutes, 30 * 24 * 60);
        assert_eq!(age.seconds, 30 * 24 * 60 * 60);
    }

    #[test]
    fn non_leap_february_borrow() {
        let age = compute_elapsed("2023-01-31", at(2023, 3, 1, 0, 0, 0));
        assert_eq!(age.days, 29);
        assert_eq!(age.full_days, 29);
    }

    #[test]
    fn remainders_stay_in_range() {
        let refs = ["2020-02-29", "2021-12-31", "2023-06-15", "2024-01-31"];
        let mut now = at(2024, 1, 1, 0, 0, 0);
        for _ in 0..500 {
            for reference in refs {
                let age = compute_elapsed(reference, now);
                assert!(age.months <= 11, "months out of range at {now}");
                assert!(age.days <= 30, "days out of range at {now}");
                assert_eq!(age.full_months, age.years * 12 + age.months);
            }
            now += chrono::TimeDelta::days(1);
        }
    }

    #[test]
    fn sub_day_counters_use_exact_elapsed_time() {
        let age = compute_elapsed("2024-03-29", at(2024, 3, 29, 1, 2, 3));
        assert_eq!(age.years, 0);
        assert_eq!(age.full_days, 0);
        assert_eq!(age.minutes, 62);
        assert_eq!(age.seconds, 3723);
    }

    #[test]
    fn full_days_ignores_time_of_day() {
        let morning = compute_elapsed("2024-03-29", at(2024, 4, 2, 0, 0, 1));
        let night = compute_elapsed("2024-03-29", at(2024, 4, 2, 23, 59, 59));
        assert_eq!(morning.full_days, 4);
        assert_eq!(night.full_days, 4);
    }
}
