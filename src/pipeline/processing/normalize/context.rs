use std::fmt;

use super::tables::{DEFAULT_YEAR, SCHOOL_YEARS};

/// Months of the school year, September through July.
///
/// August is deliberately absent: calendar documents never head a section with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Month {
    September,
    October,
    November,
    December,
    January,
    February,
    March,
    April,
    May,
    June,
    July,
}

impl Month {
    /// Header detection order.
    pub const SCHOOL_YEAR: [Month; 11] = [
        Month::September,
        Month::October,
        Month::November,
        Month::December,
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
        }
    }

    /// First school-year month whose name occurs in `line` (case-sensitive).
    pub fn first_in(line: &str) -> Option<Month> {
        Self::SCHOOL_YEAR.into_iter().find(|m| line.contains(m.name()))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accumulator threaded through one calendar cleaning pass.
///
/// A fresh context is built per document; nothing carries over between documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningContext {
    pub current_month: Option<Month>,
    pub current_year: Option<&'static str>,
}

impl CleaningContext {
    /// Build a context with the document year already detected from `lines`.
    pub fn for_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            current_month: None,
            current_year: detect_year(lines),
        }
    }

    /// The detected year, or the default when the document has none.
    pub fn year(&self) -> &'static str {
        self.current_year.unwrap_or(DEFAULT_YEAR)
    }

    /// A month name is a header only when the detected year is on the same line,
    /// or when the document has no detected year at all.
    pub fn is_header_line(&self, line: &str) -> bool {
        match self.current_year {
            Some(year) => line.contains(year),
            None => true,
        }
    }
}

/// Scan lines top to bottom and return the first school year literal found.
/// When both appear on the same line, the earlier entry of `SCHOOL_YEARS` wins.
pub fn detect_year<'a, I>(lines: I) -> Option<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .find_map(|line| SCHOOL_YEARS.iter().copied().find(|year| line.contains(year)))
}
