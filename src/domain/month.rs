use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Calendar month used as a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Month `n` months after this one (`n` may be negative).
    pub fn offset(self, n: i64) -> Self {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) + n;
        Self::new(index.div_euclid(12) as i32, index.rem_euclid(12) as u32 + 1)
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(self, other: YearMonth) -> i64 {
        (other.year as i64 - self.year as i64) * 12 + (other.month as i64 - self.month as i64)
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn parse(value: &str) -> Option<Self> {
        let (year, month) = value.trim().split_once('-')?;
        let year = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        (1..=12).contains(&month).then(|| Self::new(year, month))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_crosses_year_boundaries() {
        let dec = YearMonth::new(2023, 12);
        assert_eq!(dec.next(), YearMonth::new(2024, 1));
        assert_eq!(dec.offset(-12), YearMonth::new(2022, 12));
        assert_eq!(YearMonth::new(2024, 1).offset(-1), dec);
        assert_eq!(dec.offset(25), YearMonth::new(2026, 1));
    }

    #[test]
    fn months_until_and_display() {
        let start = YearMonth::new(2023, 3);
        assert_eq!(start.months_until(YearMonth::new(2024, 2)), 11);
        assert_eq!(start.to_string(), "2023-03");
        assert_eq!(YearMonth::parse("2023-03"), Some(start));
        assert_eq!(YearMonth::parse("2023-13"), None);
    }
}
