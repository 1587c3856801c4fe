use once_cell::sync::Lazy;
use regex::Regex;

use super::context::Month;
use super::tables::{LOCATION_CODES, TIME_CONVERSIONS};

// Compiled once; a `None` here makes every event line pass through unchanged.
static SPLIT_ORDINAL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(\d+)\s+(st|nd|rd|th)").ok());

static WEEKDAY_ORDINAL: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)\s+(\d+(?:st|nd|rd|th))").ok()
});

/// Outcome of formatting one event line. Formatting never fails: a line that
/// cannot be processed comes back as `Unchanged`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedLine {
    Formatted(String),
    Unchanged(String),
}

impl FormattedLine {
    pub fn as_str(&self) -> &str {
        match self {
            FormattedLine::Formatted(s) | FormattedLine::Unchanged(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            FormattedLine::Formatted(s) | FormattedLine::Unchanged(s) => s,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, FormattedLine::Unchanged(_))
    }
}

/// Normalize a calendar event line for retrieval:
/// rejoin split ordinals, convert known 24-hour times, expand site codes and
/// put the month and year next to the weekday when the line lacks the month.
pub fn format_event_line(line: &str, month: Month, year: &str) -> FormattedLine {
    let (Some(split_ordinal), Some(weekday_ordinal)) =
        ((*SPLIT_ORDINAL).as_ref(), (*WEEKDAY_ORDINAL).as_ref())
    else {
        return FormattedLine::Unchanged(line.to_string());
    };

    // "8 th" -> "8th"
    let mut text = split_ordinal.replace_all(line, "${1}${2}").into_owned();

    text = convert_times(&text);
    text = expand_locations(&text);

    if !text.contains(month.name()) {
        if let Some(m) = weekday_ordinal.find(&text) {
            let rest = text[m.end()..].trim();
            let rest = rest.strip_prefix(':').map(str::trim).unwrap_or(rest);
            text = format!("{} {} {}: {}", m.as_str(), month.name(), year, rest);
        }
    }

    FormattedLine::Formatted(text)
}

/// Replace each listed 24-hour time with its 12-hour form. Other times are left alone.
pub fn convert_times(line: &str) -> String {
    TIME_CONVERSIONS
        .iter()
        .fold(line.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Expand space-prefixed site codes wherever they occur, including inside longer words.
pub fn expand_locations(line: &str) -> String {
    LOCATION_CODES
        .iter()
        .fold(line.to_string(), |acc, (code, site)| acc.replace(code, site))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejoins_split_ordinal() {
        let out = format_event_line("Meeting on 8 th September", Month::September, "2025");
        assert!(out.as_str().contains("8th September"));
    }

    #[test]
    fn test_converts_only_listed_times() {
        assert_eq!(convert_times("Pick up 15:30"), "Pick up 3:30pm");
        assert_eq!(convert_times("Pick up 15:31"), "Pick up 15:31");
        assert_eq!(convert_times("10:00 - 14:00"), "10:00am - 2:00pm");
    }

    #[test]
    fn test_expands_site_codes() {
        assert_eq!(expand_locations("Assembly SH"), "Assembly, School Hall");
        assert_eq!(expand_locations("Mass SMC"), "Mass, St Mary's Church");
        assert_eq!(expand_locations("Disco JS and MS"), "Disco, Junior Site and, Middle Site");
    }

    #[test]
    fn test_site_codes_match_inside_words() {
        assert_eq!(expand_locations("Year 6 SHOW"), "Year 6, School HallOW");
    }

    #[test]
    fn test_inserts_month_and_year() {
        let out = format_event_line("Monday 8th: Sports day", Month::September, "2025");
        assert_eq!(out, FormattedLine::Formatted("Monday 8th September 2025: Sports day".to_string()));
    }

    #[test]
    fn test_inserts_month_without_colon() {
        let out = format_event_line("Friday 3 rd Harvest festival 14:00 SMC", Month::October, "2025");
        assert_eq!(
            out.as_str(),
            "Friday 3rd October 2025: Harvest festival 2:00pm, St Mary's Church"
        );
    }

    #[test]
    fn test_keeps_line_that_names_month() {
        let out = format_event_line("Tuesday 9th September: Photos", Month::September, "2025");
        assert_eq!(out.as_str(), "Tuesday 9th September: Photos");
    }

    #[test]
    fn test_no_weekday_ordinal_leaves_line() {
        let out = format_event_line("Every Monday: Swimming", Month::January, "2026");
        assert_eq!(out.as_str(), "Every Monday: Swimming");
        assert!(!out.is_unchanged());
    }

    #[test]
    fn test_text_before_weekday_is_dropped() {
        let out = format_event_line("TBC Wednesday 12th - Trip", Month::March, "2026");
        assert_eq!(out.as_str(), "Wednesday 12th March 2026: - Trip");
    }
}
