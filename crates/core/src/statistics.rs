//! Arithmetic and time-window helpers for the statistics endpoints.

use chrono::{Datelike, Duration, Months, NaiveDate, TimeZone, Utc};

use crate::types::Timestamp;

/// Rolling window for the dashboard's monthly trend.
pub const DASHBOARD_WINDOW_MONTHS: u32 = 6;
/// Rolling window for the donation statistics' monthly trend.
pub const DONATION_TREND_MONTHS: u32 = 12;
/// A donor registered within this many days counts as new.
pub const NEW_DONOR_DAYS: i64 = 30;

pub const RECENT_DONATIONS_LIMIT: i64 = 5;
pub const TOP_FUNDED_LIMIT: i64 = 5;
pub const TOP_N_LIMIT: i64 = 10;

/// Month-over-month growth as a percentage rounded to one decimal place.
/// Zero when the previous month had nothing to compare against.
pub fn monthly_growth(this_month: f64, last_month: f64) -> f64 {
    if last_month == 0.0 {
        return 0.0;
    }
    let pct = (this_month - last_month) / last_month * 100.0;
    (pct * 10.0).round() / 10.0
}

/// Whole-number share of completed projects.
pub fn completion_rate(completed: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as i64
}

fn midnight(date: NaiveDate) -> Timestamp {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default())
}

/// 00:00 UTC on the first day of `now`'s month.
pub fn start_of_month(now: Timestamp) -> Timestamp {
    let first = now.date_naive().with_day(1).unwrap_or(now.date_naive());
    midnight(first)
}

/// 00:00 UTC on the first day of the month before `now`'s.
pub fn start_of_previous_month(now: Timestamp) -> Timestamp {
    let this = start_of_month(now);
    this.checked_sub_months(Months::new(1)).unwrap_or(this)
}

/// 00:00 UTC today.
pub fn start_of_day(now: Timestamp) -> Timestamp {
    midnight(now.date_naive())
}

/// `now` moved back by `months` calendar months.
pub fn months_ago(now: Timestamp, months: u32) -> Timestamp {
    now.checked_sub_months(Months::new(months)).unwrap_or(now)
}

pub fn days_ago(now: Timestamp, days: i64) -> Timestamp {
    now - Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, h, 30, 0).unwrap()
    }

    #[test]
    fn growth() {
        assert_eq!(monthly_growth(150.0, 100.0), 50.0);
        assert_eq!(monthly_growth(50.0, 100.0), -50.0);
        assert_eq!(monthly_growth(100.0, 300.0), -66.7);
        assert_eq!(monthly_growth(100.0, 0.0), 0.0);
    }

    #[test]
    fn completion() {
        assert_eq!(completion_rate(0, 0), 0);
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(2, 2), 100);
    }

    #[test]
    fn month_boundaries() {
        let now = ts(2024, 3, 15, 10);
        assert_eq!(start_of_month(now), Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(
            start_of_previous_month(now),
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(start_of_day(now), Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn previous_month_crosses_year() {
        let now = ts(2024, 1, 5, 0);
        assert_eq!(
            start_of_previous_month(now),
            Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn windows() {
        let now = ts(2024, 8, 31, 12);
        assert_eq!(months_ago(now, 6), ts(2024, 2, 29, 12));
        assert_eq!(days_ago(now, 30), ts(2024, 8, 1, 12));
    }
}
