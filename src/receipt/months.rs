use chrono::{Datelike, Months, NaiveDate};
use std::fmt;

use crate::error::{ReceiptError, Result};

/// A calendar month, displayed as `"March 2024"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthLabel {
    year: i32,
    month: u32,
}

impl MonthLabel {
    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // year/month always come from a valid NaiveDate
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The receipt date for this month in day/month/year order, e.g. `"01/03/2024"`.
    pub fn display_date(&self) -> String {
        self.first_day().format("%d/%m/%Y").to_string()
    }
}

impl fmt::Display for MonthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day().format("%B %Y"))
    }
}

/// Number of calendar months touched by `start..=end`, without building them.
/// Zero or negative when `end` is in an earlier month than `start`.
pub fn month_span(start: NaiveDate, end: NaiveDate) -> i64 {
    let years = i64::from(end.year()) - i64::from(start.year());
    years * 12 + i64::from(end.month()) - i64::from(start.month()) + 1
}

/// Every calendar month touched by the inclusive range `start..=end`, in order.
pub fn expand(start: NaiveDate, end: NaiveDate) -> Result<Vec<MonthLabel>> {
    if start > end {
        return Err(ReceiptError::InvalidRange { start, end });
    }

    let mut months = Vec::new();
    let mut current = MonthLabel::of(start).first_day();
    while current <= end {
        months.push(MonthLabel::of(current));
        current = match current.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(months)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_month_yields_one_label() {
        let months = expand(date(2024, 3, 5), date(2024, 3, 28)).unwrap();
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].to_string(), "March 2024");

        let single_day = expand(date(2024, 3, 31), date(2024, 3, 31)).unwrap();
        assert_eq!(single_day, vec![MonthLabel::of(date(2024, 3, 1))]);
    }

    #[test]
    fn test_partial_months_at_both_ends() {
        let labels: Vec<String> = expand(date(2024, 1, 15), date(2024, 3, 10))
            .unwrap()
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(labels, ["January 2024", "February 2024", "March 2024"]);
    }

    #[test]
    fn test_crosses_year_boundary_without_gaps() {
        let months = expand(date(2023, 11, 30), date(2025, 2, 1)).unwrap();
        // 15 month boundaries crossed
        assert_eq!(months.len(), 16);
        assert_eq!(months.first().unwrap().to_string(), "November 2023");
        assert_eq!(months.last().unwrap().to_string(), "February 2025");
        for pair in months.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(
                pair[0].first_day().checked_add_months(Months::new(1)),
                Some(pair[1].first_day())
            );
        }
    }

    #[test]
    fn test_month_end_start_does_not_skip() {
        // Jan 31 + one month must land in February, not March
        let labels: Vec<String> = expand(date(2024, 1, 31), date(2024, 2, 29))
            .unwrap()
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(labels, ["January 2024", "February 2024"]);
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let err = expand(date(2024, 5, 1), date(2024, 4, 30)).unwrap_err();
        assert!(matches!(err, ReceiptError::InvalidRange { .. }));
    }

    #[test]
    fn test_month_span_matches_expand() {
        let start = date(2023, 11, 30);
        let end = date(2025, 2, 1);
        assert_eq!(month_span(start, end), expand(start, end).unwrap().len() as i64);
        assert_eq!(month_span(date(2024, 5, 1), date(2024, 5, 31)), 1);
        assert!(month_span(NaiveDate::MIN, NaiveDate::MAX) > 1_000_000);
    }

    #[test]
    fn test_display_date() {
        let march = MonthLabel::of(date(2024, 3, 17));
        assert_eq!(march.display_date(), "01/03/2024");
        assert_eq!(march.year(), 2024);
        assert_eq!(march.month(), 3);
    }
}
