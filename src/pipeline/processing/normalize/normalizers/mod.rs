// Cleaning strategies for extracted document text
pub mod calendar;
pub mod general;

pub use calendar::CalendarCleaner;
pub use general::GeneralCleaner;

/// A text cleaning strategy. Implementations are pure: the same input always
/// yields the same output, and no state survives between calls.
pub trait DocumentCleaner: Send + Sync {
    fn clean(&self, raw_text: &str) -> String;

    fn name(&self) -> &str;
}
