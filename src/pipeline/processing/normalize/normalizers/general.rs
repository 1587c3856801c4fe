use once_cell::sync::Lazy;
use regex::Regex;

use super::DocumentCleaner;

static PARAGRAPH_BREAK: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\n\s*\n").ok());

/// Whitespace normalization for OCR output and plain text files.
pub struct GeneralCleaner;

impl GeneralCleaner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GeneralCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentCleaner for GeneralCleaner {
    fn clean(&self, raw_text: &str) -> String {
        let joined = raw_text
            .split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        // Collapsing every whitespace run also folds the line breaks inserted above
        let collapsed = joined.split_whitespace().collect::<Vec<_>>().join(" ");

        restore_paragraph_breaks(&collapsed)
    }

    fn name(&self) -> &str {
        "general"
    }
}

/// Turn any blank-line gap into exactly one empty line.
/// Output of the whitespace collapse contains no newlines, so there it is a no-op.
pub fn restore_paragraph_breaks(text: &str) -> String {
    match (*PARAGRAPH_BREAK).as_ref() {
        Some(re) => re.replace_all(text, "\n\n").into_owned(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_lines_and_spaces() {
        let raw = "  School   uniform policy \n\n\n  All pupils\twear\n blazers.  \n";
        assert_eq!(
            GeneralCleaner::new().clean(raw),
            "School uniform policy All pupils wear blazers."
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(GeneralCleaner::new().clean(""), "");
        assert_eq!(GeneralCleaner::new().clean(" \n \n\t"), "");
    }

    #[test]
    fn test_output_is_fixed_point() {
        let cleaner = GeneralCleaner::new();
        let once = cleaner.clean("Term dates\n\n  Autumn:  3rd September \r\n Spring: 6th January");
        assert_eq!(cleaner.clean(&once), once);
    }

    #[test]
    fn test_paragraph_breaks_in_isolation() {
        assert_eq!(restore_paragraph_breaks("a\n \n\n  \nb"), "a\n\nb");
        assert_eq!(restore_paragraph_breaks("a b"), "a b");
    }
}
