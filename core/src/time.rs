use std::fmt::Write;

use anyhow::{anyhow, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

/// How due dates are rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DueDateFormat {
    /// "January 1st, 2024"
    #[default]
    Long,
    /// A chrono strftime pattern.
    Pattern(String),
}

impl DueDateFormat {
    /// Build from an optional configured pattern, rejecting malformed ones.
    pub fn from_config(pattern: Option<&str>) -> Result<Self> {
        match pattern {
            None => Ok(DueDateFormat::Long),
            Some(p) => {
                if p.is_empty() || StrftimeItems::new(p).any(|item| matches!(item, Item::Error)) {
                    return Err(anyhow!("Invalid date format: '{}'", p));
                }
                Ok(DueDateFormat::Pattern(p.to_string()))
            }
        }
    }

    pub fn render(&self, date: NaiveDate) -> String {
        match self {
            DueDateFormat::Long => format_due_date(date),
            DueDateFormat::Pattern(p) => format_due_date_with(date, p),
        }
    }
}

pub fn format_due_date(date: NaiveDate) -> String {
    let day = date.day();
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        day,
        ordinal_suffix(day),
        date.year()
    )
}

/// Falls back to the long form when `pattern` cannot be rendered.
pub fn format_due_date_with(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return format_due_date(date);
    }
    out
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Parse a due date typed by the user, relative to `today`.
pub fn parse_human_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty date"));
    }

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return Ok(today + Duration::days(1)),
        "eow" => {
            // Coming Sunday, today included
            let days = (7 - today.weekday().num_days_from_sunday() as i64) % 7;
            return Ok(today + Duration::days(days));
        }
        "eom" => return end_of_month(today),
        _ => {}
    }

    // 2. Relative format (+Nd, +Nw, +Nm)
    if let Some(rest) = input.strip_prefix('+') {
        return parse_relative(rest, today);
    }

    // 3. Weekday format (fri, 2:fri)
    if let Some((count, day_str)) = parse_weekday_token(input) {
        if let Ok(target) = parse_weekday_str(day_str) {
            if count < 1 {
                return Err(anyhow!("Weekday count must be at least 1"));
            }
            let mut days_needed = target.num_days_from_sunday() as i64
                - today.weekday().num_days_from_sunday() as i64;
            if days_needed <= 0 {
                days_needed += 7;
            }
            return (count - 1)
                .checked_mul(7)
                .and_then(|extra| extra.checked_add(days_needed))
                .and_then(Duration::try_days)
                .and_then(|delta| today.checked_add_signed(delta))
                .ok_or_else(|| anyhow!("Date out of range: {}", input));
        }
    }

    // 4. Fallback to ISO dates
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| anyhow!("Could not parse date: {}", input))
}

fn parse_relative(rest: &str, today: NaiveDate) -> Result<NaiveDate> {
    if rest.len() < 2 || !rest.is_char_boundary(rest.len() - 1) {
        return Err(anyhow!("Invalid relative format: +{}", rest));
    }
    let (num_str, unit) = rest.split_at(rest.len() - 1);
    let count: u32 = num_str
        .parse()
        .map_err(|_| anyhow!("Invalid relative format: +{}", rest))?;

    let target = match unit {
        "d" => today.checked_add_signed(Duration::days(count as i64)),
        "w" => today.checked_add_signed(Duration::weeks(count as i64)),
        // Clamps to the last day when the month is shorter (Jan 31 + 1m -> Feb 28/29)
        "m" => today.checked_add_months(Months::new(count)),
        _ => return Err(anyhow!("Unknown unit in relative time: {}", unit)),
    };
    target.ok_or_else(|| anyhow!("Date out of range: +{}", rest))
}

fn end_of_month(today: NaiveDate) -> Result<NaiveDate> {
    let first = today
        .with_day(1)
        .ok_or_else(|| anyhow!("Invalid date: {}", today))?;
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| anyhow!("Date out of range: {}", today))
}

fn parse_weekday_token(input: &str) -> Option<(i64, &str)> {
    if input.contains(':') {
        let parts: Vec<&str> = input.split(':').collect();
        if parts.len() == 2 {
            if let Ok(count) = parts[0].parse::<i64>() {
                return Some((count, parts[1]));
            }
        }
    } else {
        // Just "fri" means 1:fri
        return Some((1, input));
    }
    None
}

fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s.to_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(anyhow!("Invalid weekday")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2024-01-03 is a Wednesday
    fn wednesday() -> NaiveDate {
        date(2024, 1, 3)
    }

    #[test]
    fn test_format_due_date_ordinals() {
        assert_eq!(format_due_date(date(2024, 1, 1)), "January 1st, 2024");
        assert_eq!(format_due_date(date(2024, 3, 2)), "March 2nd, 2024");
        assert_eq!(format_due_date(date(2024, 3, 3)), "March 3rd, 2024");
        assert_eq!(format_due_date(date(2024, 3, 11)), "March 11th, 2024");
        assert_eq!(format_due_date(date(2024, 3, 12)), "March 12th, 2024");
        assert_eq!(format_due_date(date(2024, 3, 13)), "March 13th, 2024");
        assert_eq!(format_due_date(date(2024, 3, 22)), "March 22nd, 2024");
        assert_eq!(format_due_date(date(2024, 3, 23)), "March 23rd, 2024");
        assert_eq!(format_due_date(date(2024, 12, 31)), "December 31st, 2024");
    }

    #[test]
    fn test_format_with_pattern() {
        assert_eq!(format_due_date_with(date(2024, 7, 4), "%d/%m/%Y"), "04/07/2024");
    }

    #[test]
    fn test_due_date_format_from_config() {
        assert_eq!(DueDateFormat::from_config(None).unwrap(), DueDateFormat::Long);
        assert_eq!(
            DueDateFormat::from_config(Some("%Y-%m-%d")).unwrap(),
            DueDateFormat::Pattern("%Y-%m-%d".to_string())
        );
        assert!(DueDateFormat::from_config(Some("%Q")).is_err());
        assert!(DueDateFormat::from_config(Some("")).is_err());
    }

    #[test]
    fn test_keywords() {
        let today = wednesday();
        assert_eq!(parse_human_date("today", today).unwrap(), today);
        assert_eq!(parse_human_date("TOM", today).unwrap(), date(2024, 1, 4));
        assert_eq!(parse_human_date("eow", today).unwrap(), date(2024, 1, 7));
        assert_eq!(parse_human_date("eow", date(2024, 1, 7)).unwrap(), date(2024, 1, 7));
        assert_eq!(parse_human_date("eom", date(2024, 2, 10)).unwrap(), date(2024, 2, 29));
        assert_eq!(parse_human_date("eom", date(2024, 12, 5)).unwrap(), date(2024, 12, 31));
    }

    #[test]
    fn test_relative() {
        let today = wednesday();
        assert_eq!(parse_human_date("+3d", today).unwrap(), date(2024, 1, 6));
        assert_eq!(parse_human_date("+10d", today).unwrap(), date(2024, 1, 13));
        assert_eq!(parse_human_date("+2w", today).unwrap(), date(2024, 1, 17));
        assert_eq!(parse_human_date("+1m", date(2024, 1, 31)).unwrap(), date(2024, 2, 29));
        assert!(parse_human_date("+d", today).is_err());
        assert!(parse_human_date("+3y", today).is_err());
    }

    #[test]
    fn test_weekdays() {
        let today = wednesday();
        assert_eq!(parse_human_date("fri", today).unwrap(), date(2024, 1, 5));
        assert_eq!(parse_human_date("2:fri", today).unwrap(), date(2024, 1, 12));
        // Same weekday means next week
        assert_eq!(parse_human_date("wednesday", today).unwrap(), date(2024, 1, 10));
        assert!(parse_human_date("0:fri", today).is_err());
    }

    #[test]
    fn test_weekday_count_out_of_range() {
        let today = wednesday();
        for input in ["100000000:fri", "9223372036854775807:fri"] {
            let err = parse_human_date(input, today).unwrap_err();
            assert_eq!(err.to_string(), format!("Date out of range: {}", input));
        }
    }

    #[test]
    fn test_iso_and_garbage() {
        let today = wednesday();
        assert_eq!(parse_human_date("2024-01-01", today).unwrap(), date(2024, 1, 1));
        assert!(parse_human_date("someday", today).is_err());
        assert!(parse_human_date("   ", today).is_err());
    }

    #[test]
    fn test_parse_weekday_token() {
        assert_eq!(parse_weekday_token("fri"), Some((1, "fri")));
        assert_eq!(parse_weekday_token("2:fri"), Some((2, "fri")));
        assert_eq!(parse_weekday_token("10:mon"), Some((10, "mon")));
        assert_eq!(parse_weekday_token("x:mon"), None);
    }
}
