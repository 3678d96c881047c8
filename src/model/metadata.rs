//! Presentation metadata: author, date, theme and paging template.

use chrono::{DateTime, Local};
use std::fmt::Write;

/// Default date pattern (strftime syntax), rendered with the local date.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default paging template: current page then total.
pub const DEFAULT_PAGING: &str = "Slide %d / %d";

/// Default theme identifier.
pub const DEFAULT_THEME: &str = "default";

/// Position marker inside a paging template.
pub const PAGING_MARKER: &str = "%d";

/// Metadata parsed from the optional first segment of a document.
///
/// `date` holds the *pattern*; the displayed string comes from
/// [`Metadata::format_date`] at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Presenter name shown in the status bar.
    pub author: String,
    /// strftime pattern for the status bar date.
    pub date: String,
    /// Theme identifier (see `view::highlighter`).
    pub theme: String,
    /// Paging template with zero, one or two `%d` markers.
    pub paging: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            author: default_author(),
            date: DEFAULT_DATE_FORMAT.to_string(),
            theme: DEFAULT_THEME.to_string(),
            paging: DEFAULT_PAGING.to_string(),
        }
    }
}

impl Metadata {
    /// Render the date pattern against `now`.
    ///
    /// A pattern chrono cannot format is shown literally.
    pub fn format_date(&self, now: DateTime<Local>) -> String {
        let mut out = String::new();
        match write!(out, "{}", now.format(&self.date)) {
            Ok(()) => out,
            Err(_) => self.date.clone(),
        }
    }
}

/// Current user's login name, or empty when the environment has none.
pub fn default_author() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default()
}

/// Fill a paging template.
///
/// - two markers: 1-based page, then total
/// - one marker: 1-based page
/// - any other count: the template unchanged
pub fn render_paging(template: &str, page: usize, total: usize) -> String {
    match template.matches(PAGING_MARKER).count() {
        2 => template
            .replacen(PAGING_MARKER, &(page + 1).to_string(), 1)
            .replacen(PAGING_MARKER, &total.to_string(), 1),
        1 => template.replacen(PAGING_MARKER, &(page + 1).to_string(), 1),
        _ => template.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 30, 0).unwrap()
    }

    #[test]
    fn paging_with_two_markers_shows_page_and_total() {
        assert_eq!(render_paging("Slide %d / %d", 0, 5), "Slide 1 / 5");
        assert_eq!(render_paging("%d of %d", 4, 5), "5 of 5");
    }

    #[test]
    fn paging_with_one_marker_shows_page_only() {
        assert_eq!(render_paging("Page %d", 2, 10), "Page 3");
    }

    #[test]
    fn paging_without_markers_is_literal() {
        assert_eq!(render_paging("my talk", 3, 10), "my talk");
    }

    #[test]
    fn paging_with_three_markers_is_literal() {
        assert_eq!(render_paging("%d %d %d", 0, 1), "%d %d %d");
    }

    #[test]
    fn format_date_uses_pattern() {
        let meta = Metadata {
            date: "%d.%m.%Y".to_string(),
            ..Metadata::default()
        };
        assert_eq!(meta.format_date(fixed_now()), "09.03.2024");
    }

    #[test]
    fn format_date_default_is_iso() {
        let meta = Metadata::default();
        assert_eq!(meta.format_date(fixed_now()), "2024-03-09");
    }

    #[test]
    fn format_date_invalid_pattern_is_literal() {
        let meta = Metadata {
            date: "%Q bogus".to_string(),
            ..Metadata::default()
        };
        assert_eq!(meta.format_date(fixed_now()), "%Q bogus");
    }

    #[test]
    fn default_metadata_values() {
        let meta = Metadata::default();
        assert_eq!(meta.date, DEFAULT_DATE_FORMAT);
        assert_eq!(meta.theme, DEFAULT_THEME);
        assert_eq!(meta.paging, DEFAULT_PAGING);
    }
}
