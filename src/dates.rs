// src/dates.rs
//! Display formatting for the partial dates found in CV documents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Display policy for dates. Styles degrade to what the value actually
/// carries: a year-only value renders as the year under every style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateStyle {
    /// `2024`
    Year,
    /// `Jan 2024`
    #[default]
    MonthYear,
    /// `January 5, 2024`
    Long,
}

/// True when a date value is the sentinel for an ongoing engagement.
///
/// Only the word "present" counts, compared case-insensitively after
/// trimming. Anything that is not text is never the sentinel.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::String(s) => is_present_str(s),
        _ => false,
    }
}

/// String form of [`is_present`], for values already coerced to text.
pub fn is_present_str(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("present")
}

/// Format a raw date value for display.
///
/// The present sentinel renders as "Present" under every style; absent or
/// non-scalar input renders as the empty string. Text in `YYYY`, `YYYY-MM`,
/// or `YYYY-MM-DD` shape is formatted per the style, and anything else
/// comes back unchanged so malformed data stays visible instead of
/// disappearing.
pub fn format_date(value: &Value, style: DateStyle) -> String {
    match value {
        Value::String(s) => format_date_str(s, style),
        Value::Number(n) => format_date_str(&n.to_string(), style),
        _ => String::new(),
    }
}

/// String form of [`format_date`].
pub fn format_date_str(raw: &str, style: DateStyle) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if is_present_str(trimmed) {
        return "Present".to_string();
    }
    match PartialDate::parse(trimmed) {
        Some(date) => date.display(style),
        None => raw.to_string(),
    }
}

/// Render an engagement period, e.g. `Jan 2020 - Present`.
///
/// A missing end on a dated engagement reads as ongoing. With no start the
/// end stands alone; with nothing at all the period is empty.
pub fn format_date_range(start: Option<&str>, end: Option<&str>, style: DateStyle) -> String {
    let start_text = start.map(|s| format_date_str(s, style)).unwrap_or_default();
    let end_text = end.map(|s| format_date_str(s, style)).unwrap_or_default();
    if start_text.is_empty() {
        return end_text;
    }
    if end_text.is_empty() {
        return format!("{} - Present", start_text);
    }
    format!("{} - {}", start_text, end_text)
}

/// A calendar date with optional precision: year, year-month, or full day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PartialDate {
    year: i32,
    month: Option<u32>,
    day: Option<u32>,
}

impl PartialDate {
    /// Parse `YYYY`, `YYYY-MM`, or `YYYY-MM-DD`. Anything else, including
    /// out-of-range months and impossible days, is `None`.
    fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.splitn(3, '-');

        let year_part = parts.next()?;
        if year_part.len() != 4 || !is_digits(year_part) {
            return None;
        }
        let year: i32 = year_part.parse().ok()?;

        let month = match parts.next() {
            None => {
                return Some(Self {
                    year,
                    month: None,
                    day: None,
                })
            }
            Some(part) => {
                if part.is_empty() || part.len() > 2 || !is_digits(part) {
                    return None;
                }
                let month: u32 = part.parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, 1)?;
                month
            }
        };

        let day = match parts.next() {
            None => {
                return Some(Self {
                    year,
                    month: Some(month),
                    day: None,
                })
            }
            Some(part) => {
                if part.is_empty() || part.len() > 2 || !is_digits(part) {
                    return None;
                }
                part.parse::<u32>().ok()?
            }
        };

        // Rejects the likes of February 30th.
        NaiveDate::from_ymd_opt(year, month, day)?;

        Some(Self {
            year,
            month: Some(month),
            day: Some(day),
        })
    }

    fn display(&self, style: DateStyle) -> String {
        match style {
            DateStyle::Year => self.year.to_string(),
            DateStyle::MonthYear => match self.month_start() {
                Some(date) => format!("{} {}", date.format("%b"), self.year),
                None => self.year.to_string(),
            },
            DateStyle::Long => match (self.month_start(), self.day) {
                (Some(date), Some(day)) => {
                    format!("{} {}, {}", date.format("%B"), day, self.year)
                }
                (Some(date), None) => format!("{} {}", date.format("%B"), self.year),
                _ => self.year.to_string(),
            },
        }
    }

    fn month_start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month?, 1)
    }
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_present_str() {
        assert!(is_present_str("present"));
        assert!(is_present_str("Present"));
        assert!(is_present_str("PRESENT"));
        assert!(is_present_str("  present  "));
        assert!(!is_present_str(""));
        assert!(!is_present_str("presently"));
        assert!(!is_present_str("2024-01"));
    }

    #[test]
    fn test_is_present_value() {
        assert!(is_present(&json!("Present")));
        assert!(!is_present(&json!(null)));
        assert!(!is_present(&json!(2024)));
        assert!(!is_present(&json!(["present"])));
    }

    #[test]
    fn test_format_date_absent_and_sentinel() {
        assert_eq!(format_date(&json!(null), DateStyle::MonthYear), "");
        assert_eq!(format_date(&json!(""), DateStyle::MonthYear), "");
        assert_eq!(format_date(&json!("   "), DateStyle::Long), "");
        assert_eq!(format_date(&json!("present"), DateStyle::Year), "Present");
        assert_eq!(
            format_date(&json!("present"), DateStyle::MonthYear),
            "Present"
        );
        assert_eq!(
            format_date(&json!("Present"), DateStyle::Long),
            "Present"
        );
    }

    #[test]
    fn test_format_date_year_only_value() {
        for style in [DateStyle::Year, DateStyle::MonthYear, DateStyle::Long] {
            assert_eq!(format_date(&json!("2024"), style), "2024");
        }
        assert_eq!(format_date(&json!(2024), DateStyle::MonthYear), "2024");
    }

    #[test]
    fn test_format_date_year_month_value() {
        assert_eq!(format_date(&json!("2024-06"), DateStyle::Year), "2024");
        assert_eq!(
            format_date(&json!("2024-06"), DateStyle::MonthYear),
            "Jun 2024"
        );
        assert_eq!(
            format_date(&json!("2024-06"), DateStyle::Long),
            "June 2024"
        );
    }

    #[test]
    fn test_format_date_full_value() {
        assert_eq!(
            format_date(&json!("2024-06-15"), DateStyle::Year),
            "2024"
        );
        assert_eq!(
            format_date(&json!("2024-06-15"), DateStyle::MonthYear),
            "Jun 2024"
        );
        assert_eq!(
            format_date(&json!("2024-06-15"), DateStyle::Long),
            "June 15, 2024"
        );
        assert_eq!(
            format_date(&json!("2024-01-05"), DateStyle::Long),
            "January 5, 2024"
        );
    }

    #[test]
    fn test_format_date_trims_before_parsing() {
        assert_eq!(
            format_date(&json!("  2021-06  "), DateStyle::MonthYear),
            "Jun 2021"
        );
    }

    #[test]
    fn test_format_date_malformed_comes_back_unchanged() {
        for raw in [
            "not-a-date",
            "2024-13",
            "2024-00",
            "2024-02-30",
            "2024-",
            "24-06",
            "2024-06-15-extra",
            "June 2024",
        ] {
            assert_eq!(format_date(&json!(raw), DateStyle::Year), raw);
            assert_eq!(format_date(&json!(raw), DateStyle::MonthYear), raw);
            assert_eq!(format_date(&json!(raw), DateStyle::Long), raw);
        }
    }

    #[test]
    fn test_format_date_single_digit_month_is_tolerated() {
        assert_eq!(
            format_date(&json!("2024-6"), DateStyle::MonthYear),
            "Jun 2024"
        );
    }

    #[test]
    fn test_format_date_range() {
        assert_eq!(
            format_date_range(Some("2020-01"), None, DateStyle::MonthYear),
            "Jan 2020 - Present"
        );
        assert_eq!(
            format_date_range(Some("2019-03"), Some("2021-06"), DateStyle::MonthYear),
            "Mar 2019 - Jun 2021"
        );
        assert_eq!(
            format_date_range(Some("2020"), Some("present"), DateStyle::Year),
            "2020 - Present"
        );
        assert_eq!(format_date_range(None, None, DateStyle::MonthYear), "");
        assert_eq!(
            format_date_range(None, Some("2024"), DateStyle::MonthYear),
            "2024"
        );
        assert_eq!(
            format_date_range(Some(""), Some("2024"), DateStyle::MonthYear),
            "2024"
        );
    }
}
