//! ISO week helpers used to scope commitments to one planning week.

use chrono::{Datelike, Duration, NaiveDate};

use super::commitment::Commitment;
use crate::error::ParseError;

/// Number of business days in a planning week (Monday to Friday).
pub const BUSINESS_DAYS: usize = 5;

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Monday through Friday of the ISO week containing `week_start`.
pub fn business_days(week_start_date: NaiveDate) -> [NaiveDate; BUSINESS_DAYS] {
    let monday = week_start(week_start_date);
    std::array::from_fn(|offset| monday + Duration::days(offset as i64))
}

/// Whether `date` falls in the same ISO week (Monday to Sunday) as `week_start`.
pub fn in_iso_week(date: NaiveDate, week_start_date: NaiveDate) -> bool {
    date.iso_week() == week_start_date.iso_week()
}

/// Commitments dated inside the ISO week of `week_start`.
pub fn scope_to_week(commitments: &[Commitment], week_start_date: NaiveDate) -> Vec<Commitment> {
    commitments
        .iter()
        .filter(|c| in_iso_week(c.date, week_start_date))
        .cloned()
        .collect()
}

/// Parse a `YYYY-MM-DD` calendar day.
pub fn parse_date(value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| ParseError::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::BucketType;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_start_returns_monday() {
        // 2024-01-17 is a Wednesday
        assert_eq!(week_start(day(2024, 1, 17)), day(2024, 1, 15));
        assert_eq!(week_start(day(2024, 1, 15)), day(2024, 1, 15));
        assert_eq!(week_start(day(2024, 1, 21)), day(2024, 1, 15));
    }

    #[test]
    fn week_start_crosses_year_boundary() {
        // 2025-01-01 is a Wednesday; its Monday is in 2024
        assert_eq!(week_start(day(2025, 1, 1)), day(2024, 12, 30));
    }

    #[test]
    fn business_days_are_monday_to_friday() {
        let days = business_days(day(2024, 1, 18));
        assert_eq!(days[0], day(2024, 1, 15));
        assert_eq!(days[4], day(2024, 1, 19));
    }

    #[test]
    fn scope_keeps_whole_iso_week_including_weekend() {
        let commitments = vec![
            Commitment::new(day(2024, 1, 14), BucketType::Rock),
            Commitment::new(day(2024, 1, 15), BucketType::Rock),
            Commitment::new(day(2024, 1, 21), BucketType::Sand),
            Commitment::new(day(2024, 1, 22), BucketType::Pebble),
        ];
        let scoped = scope_to_week(&commitments, day(2024, 1, 17));
        assert_eq!(scoped.len(), 2);
        assert_eq!(scoped[0].date, day(2024, 1, 15));
        assert_eq!(scoped[1].date, day(2024, 1, 21));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(parse_date("2024-02-29").unwrap(), day(2024, 2, 29));
        assert!(parse_date("2023-02-29").is_err());
        assert!(matches!(
            parse_date("next monday"),
            Err(ParseError::InvalidDate { .. })
        ));
    }
}
