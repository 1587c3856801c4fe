//! Document normalization: pick a cleaning strategy from the filename and
//! turn extracted text into retrieval-friendly text.
//!
//! Everything in here is a pure function of `(filename, raw_text)`.

pub mod context;
pub mod event_format;
pub mod normalizers;
pub mod tables;

use std::fmt;

use crate::domain::{CleanedDocument, RawDocument};
use normalizers::{CalendarCleaner, DocumentCleaner, GeneralCleaner};

static CALENDAR: CalendarCleaner = CalendarCleaner;
static GENERAL: GeneralCleaner = GeneralCleaner;

/// Filename fragments (lowercase) that mark a calendar document.
const CALENDAR_MARKERS: &[&str] = &["calendar", "dates"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CleaningStrategy {
    Calendar,
    General,
}

impl CleaningStrategy {
    /// Calendar cleaning for filenames containing "calendar" or "dates" in any case.
    pub fn for_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        if CALENDAR_MARKERS.iter().any(|m| lower.contains(m)) {
            CleaningStrategy::Calendar
        } else {
            CleaningStrategy::General
        }
    }

    pub fn cleaner(self) -> &'static dyn DocumentCleaner {
        match self {
            CleaningStrategy::Calendar => &CALENDAR,
            CleaningStrategy::General => &GENERAL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CleaningStrategy::Calendar => "calendar",
            CleaningStrategy::General => "general",
        }
    }
}

impl fmt::Display for CleaningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clean raw text with the strategy chosen for `filename`.
pub fn clean_document_text(raw_text: &str, filename: &str) -> String {
    CleaningStrategy::for_filename(filename)
        .cleaner()
        .clean(raw_text)
}

pub fn clean_document(document: &RawDocument) -> CleanedDocument {
    CleanedDocument {
        text: clean_document_text(&document.raw_text, &document.filename),
    }
}
