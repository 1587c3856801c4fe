//! Fixed lookup tables for the school calendar conventions.
//!
//! Entries are applied in the order listed.

/// 24-hour times rewritten to their 12-hour form by exact substring replacement.
pub const TIME_CONVERSIONS: &[(&str, &str)] = &[
    ("15:00", "3:00pm"),
    ("15:15", "3:15pm"),
    ("15:30", "3:30pm"),
    ("15:45", "3:45pm"),
    ("16:00", "4:00pm"),
    ("16:15", "4:15pm"),
    ("16:30", "4:30pm"),
    ("16:45", "4:45pm"),
    ("10:00", "10:00am"),
    ("11:00", "11:00am"),
    ("14:00", "2:00pm"),
];

/// Space-prefixed site codes and their comma-prefixed site names.
pub const LOCATION_CODES: &[(&str, &str)] = &[
    (" SH", ", School Hall"),
    (" SMC", ", St Mary's Church"),
    (" IS", ", Infant Site"),
    (" MS", ", Middle Site"),
    (" JS", ", Junior Site"),
];

/// Lowercase fragments that mark a legend or footer line.
pub const LEGEND_TOKENS: &[&str] = &["key:", "sh =", "smc =", "is =", "ms =", "js =", "tbc ="];

/// Prefixes of narrative lines that are never passed through.
pub const EXCLUDED_PREFIXES: &[&str] = &["KEY:", "Please note"];

pub const WEEKDAYS: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Year literals searched for, in order of preference within a single line.
pub const SCHOOL_YEARS: &[&str] = &["2025", "2026"];

/// Year used in headers and event lines when the document names none.
pub const DEFAULT_YEAR: &str = "2025";
