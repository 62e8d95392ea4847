use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::InvalidDateRange;

/// Inclusive calendar-date bounds for a search; either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, InvalidDateRange> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(InvalidDateRange { start: s, end: e });
            }
        }
        Ok(Self { start, end })
    }

    /// Jan 1 through Dec 31 of `year`. `None` if the year falls outside the
    /// supported calendar range.
    pub fn year(year: i32) -> Option<Self> {
        Some(Self {
            start: Some(NaiveDate::from_ymd_opt(year, 1, 1)?),
            end: Some(NaiveDate::from_ymd_opt(year, 12, 31)?),
        })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start {
            Some(start) => write!(f, "{start}..")?,
            None => write!(f, "*..")?,
        }
        match self.end {
            Some(end) => write!(f, "{end}"),
            None => write!(f, "*"),
        }
    }
}

/// The two dimensions the corpus is stratified along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetDimension {
    Year,
    Newspaper,
}

impl FacetDimension {
    /// API path segment for this dimension.
    pub fn as_str(&self) -> &'static str {
        match self {
            FacetDimension::Year => "year",
            FacetDimension::Newspaper => "newspaper",
        }
    }
}

impl fmt::Display for FacetDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One distinct value of a faceted dimension with its hit count.
/// Bucket order from the API is not guaranteed; consumers sort before
/// iterating.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FacetBucket {
    pub value: String,
    pub count: u64,
}

/// Minimal search result: the article identifier only. Everything else in
/// the response payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentHit {
    pub uid: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("invalid test date")
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        let err = DateRange::new(Some(date("1930-01-01")), Some(date("1920-01-01")));
        assert!(err.is_err());
    }

    #[test]
    fn range_accepts_open_bounds() {
        assert!(DateRange::new(None, None).is_ok());
        assert!(DateRange::new(Some(date("1920-01-01")), None).is_ok());
        assert!(DateRange::new(None, Some(date("1920-01-01"))).is_ok());
    }

    #[test]
    fn year_range_spans_full_year() {
        let range = DateRange::year(1920).expect("1920 is in range");
        assert_eq!(range.start, Some(date("1920-01-01")));
        assert_eq!(range.end, Some(date("1920-12-31")));
    }

    #[test]
    fn range_display_marks_open_ends() {
        let range = DateRange::new(Some(date("1920-01-01")), None).unwrap();
        assert_eq!(range.to_string(), "1920-01-01..*");
        assert_eq!(DateRange::new(None, None).unwrap().to_string(), "*..*");
    }
}
