use tracing::debug;

use super::DocumentCleaner;
use crate::pipeline::processing::normalize::context::{CleaningContext, Month};
use crate::pipeline::processing::normalize::event_format::format_event_line;
use crate::pipeline::processing::normalize::tables::{EXCLUDED_PREFIXES, LEGEND_TOKENS, WEEKDAYS};

/// Cleaner for OCR'd school calendar pages.
///
/// Produces one `<MONTH> <YEAR> EVENTS:` block per month header, with each
/// event line rewritten to carry its full date. Legend lines are dropped and
/// anything else that is not an event is kept as written.
pub struct CalendarCleaner;

impl CalendarCleaner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CalendarCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentCleaner for CalendarCleaner {
    fn clean(&self, raw_text: &str) -> String {
        let lines: Vec<&str> = raw_text.split('\n').collect();
        let mut ctx = CleaningContext::for_lines(lines.iter().copied());
        let mut cleaned: Vec<String> = Vec::new();

        for line in lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
            if is_legend_line(line) {
                continue;
            }

            if let Some(month) = Month::first_in(line).filter(|_| ctx.is_header_line(line)) {
                ctx.current_month = Some(month);
                cleaned.push(month_header(month, ctx.year()));
                continue;
            }

            match ctx.current_month {
                Some(month) if is_event_line(line) => {
                    let formatted = format_event_line(line, month, ctx.year());
                    if formatted.is_unchanged() {
                        debug!(line, "event line kept as written");
                    }
                    let text = formatted.into_string();
                    if !text.is_empty() {
                        cleaned.push(text);
                    }
                }
                _ => {
                    if !EXCLUDED_PREFIXES.iter().any(|p| line.starts_with(p)) {
                        cleaned.push(line.to_string());
                    }
                }
            }
        }

        cleaned.join("\n")
    }

    fn name(&self) -> &str {
        "calendar"
    }
}

/// Header block surrounded by blank lines once joined.
fn month_header(month: Month, year: &str) -> String {
    format!("\n{} {} EVENTS:\n", month.name().to_uppercase(), year)
}

fn is_legend_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    LEGEND_TOKENS.iter().any(|token| lower.contains(token))
}

fn is_event_line(line: &str) -> bool {
    WEEKDAYS.iter().any(|day| line.contains(day))
}
