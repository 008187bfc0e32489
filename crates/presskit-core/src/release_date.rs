//! Ordering of storefront release-date strings.
//!
//! Storefronts show release dates as free text ("25 Jan, 2026", "Q3 2026",
//! "Coming Soon"). [`ReleaseDate::parse`] maps that text onto a totally
//! ordered key: unparseable text sorts as the distant past and unannounced
//! dates sort after every concrete date.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Sort key for a free-text release date.
///
/// Variant order is the sort order: `Unknown < Dated(..) < Unannounced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReleaseDate {
    /// Text that could not be interpreted
    Unknown,
    /// A concrete day; month, quarter and year forms use the first day of the period
    Dated(NaiveDate),
    /// Empty text or a "coming soon"-style placeholder
    Unannounced,
}

const UNANNOUNCED_MARKERS: &[&str] = &["tba", "tbd", "to be announced", "to be determined"];

const DAY_FORMATS: &[&str] = &["%d %b %Y", "%b %d %Y", "%d %B %Y", "%B %d %Y"];

impl ReleaseDate {
    /// Interpret a storefront release-date string.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Self::Unannounced;
        }

        let lower = normalized.to_lowercase();
        if lower.contains("coming soon") || UNANNOUNCED_MARKERS.contains(&lower.as_str()) {
            return Self::Unannounced;
        }

        Self::parse_day(&normalized)
            .or_else(|| Self::parse_month(&normalized))
            .or_else(|| Self::parse_quarter(&lower))
            .or_else(|| Self::parse_year(&lower))
            .map_or(Self::Unknown, Self::Dated)
    }

    /// The concrete date, if any.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Dated(date) => Some(*date),
            Self::Unknown | Self::Unannounced => None,
        }
    }

    fn parse_day(text: &str) -> Option<NaiveDate> {
        DAY_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    }

    fn parse_month(text: &str) -> Option<NaiveDate> {
        let with_day = format!("1 {text}");
        ["%d %b %Y", "%d %B %Y"]
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(&with_day, format).ok())
    }

    fn parse_quarter(lower: &str) -> Option<NaiveDate> {
        static QUARTER_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = QUARTER_REGEX
            .get_or_init(|| Regex::new(r"^q([1-4]) (\d{4})$").expect("valid regex"));

        let captures = regex.captures(lower)?;
        let quarter: u32 = captures[1].parse().ok()?;
        let year: i32 = captures[2].parse().ok()?;
        NaiveDate::from_ymd_opt(year, (quarter - 1) * 3 + 1, 1)
    }

    fn parse_year(lower: &str) -> Option<NaiveDate> {
        if lower.len() != 4 || !lower.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year: i32 = lower.parse().ok()?;
        NaiveDate::from_ymd_opt(year, 1, 1)
    }
}

/// Strip punctuation the storefront sprinkles into dates and collapse spaces.
fn normalize(text: &str) -> String {
    text.replace([',', '.'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn test_parse_day_formats() {
        assert_eq!(ReleaseDate::parse("25 Jan, 2026"), ReleaseDate::Dated(ymd(2026, 1, 25)));
        assert_eq!(ReleaseDate::parse("Jan 25, 2026"), ReleaseDate::Dated(ymd(2026, 1, 25)));
        assert_eq!(
            ReleaseDate::parse("3 September, 2026"),
            ReleaseDate::Dated(ymd(2026, 9, 3))
        );
    }

    #[test]
    fn test_parse_coarse_formats() {
        assert_eq!(ReleaseDate::parse("March 2026"), ReleaseDate::Dated(ymd(2026, 3, 1)));
        assert_eq!(ReleaseDate::parse("Q3 2026"), ReleaseDate::Dated(ymd(2026, 7, 1)));
        assert_eq!(ReleaseDate::parse("2027"), ReleaseDate::Dated(ymd(2027, 1, 1)));
    }

    #[test]
    fn test_parse_placeholders() {
        assert_eq!(ReleaseDate::parse(""), ReleaseDate::Unannounced);
        assert_eq!(ReleaseDate::parse("  Coming Soon "), ReleaseDate::Unannounced);
        assert_eq!(ReleaseDate::parse("To be announced"), ReleaseDate::Unannounced);
        assert_eq!(ReleaseDate::parse("not a date"), ReleaseDate::Unknown);
    }

    #[test]
    fn test_descending_sort_fallback_order() {
        let mut inputs = vec!["not a date", "25 Jan, 2026", "", "Coming Soon"];
        inputs.sort_by_key(|text| std::cmp::Reverse(ReleaseDate::parse(text)));

        assert_eq!(ReleaseDate::parse(inputs[0]), ReleaseDate::Unannounced);
        assert_eq!(ReleaseDate::parse(inputs[1]), ReleaseDate::Unannounced);
        assert_eq!(inputs[2], "25 Jan, 2026");
        assert_eq!(inputs[3], "not a date");
    }

    #[test]
    fn test_dated_ordering() {
        assert!(ReleaseDate::parse("Feb 1, 2026") > ReleaseDate::parse("25 Jan, 2026"));
        assert!(ReleaseDate::parse("garbage") < ReleaseDate::parse("1 Jan, 1970"));
        assert_eq!(ReleaseDate::parse("Q1 2026").date(), Some(ymd(2026, 1, 1)));
    }
}
