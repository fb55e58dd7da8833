//! Canonical month keys parsed from free-form date labels.

use chrono::{Datelike, Month, NaiveDate};
use std::fmt;

/// Year applied to labels that carry only a month name.
///
/// Record dates are month labels such as "Nov 2024"; a bare "Nov" has no
/// year of its own, so every such label in one bucketing call gets the
/// same caller-chosen year instead of a guess per record.
pub const DEFAULT_ASSUMED_YEAR: i32 = 2025;

/// Calendar month used as a time bucket key.
///
/// Ordering is chronological: year first, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Creates key for a month number 1-12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Parses a date label into a month key.
    ///
    /// Accepted forms: `Nov 2024`, `November 2024`, `Nov, 2024`, `2024-11`,
    /// `2024-11-05`, `11/2024`, and a bare month name (`Nov`) which takes
    /// `assumed_year`.
    ///
    /// # Returns
    ///
    /// Month key, or None for empty or unrecognized labels
    pub fn parse(label: &str, assumed_year: i32) -> Option<Self> {
        let label = label.trim();
        let parts: Vec<&str> = label.split_whitespace().collect();

        match parts.as_slice() {
            [name, year] => {
                let month = month_number(name.trim_end_matches(','))?;
                Self::new(parse_year(year)?, month)
            }
            [single] => match month_number(single) {
                Some(month) => Self::new(assumed_year, month),
                None => parse_numeric(single),
            },
            _ => None,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Canonical "Mon YYYY" label.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("???");
        write!(f, "{} {}", &name[..3], self.year)
    }
}

fn month_number(name: &str) -> Option<u32> {
    name.parse::<Month>().ok().map(|m| m.number_from_month())
}

fn parse_year(text: &str) -> Option<i32> {
    if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn parse_numeric(text: &str) -> Option<MonthKey> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return MonthKey::new(date.year(), date.month());
    }

    if let Some((year, month)) = text.split_once('-') {
        return MonthKey::new(parse_year(year)?, parse_month_digits(month)?);
    }

    if let Some((month, year)) = text.split_once('/') {
        return MonthKey::new(parse_year(year)?, parse_month_digits(month)?);
    }

    None
}

fn parse_month_digits(text: &str) -> Option<u32> {
    if text.is_empty() || text.len() > 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
