//! Syntax highlighting for fenced code blocks using syntect + two-face.

use crate::model::RenderError;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::sync::LazyLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::FontStyle;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use two_face::theme::{EmbeddedLazyThemeSet, EmbeddedThemeName};

/// Lazy-loaded theme set containing all two-face themes.
static THEME_SET: LazyLock<EmbeddedLazyThemeSet> = LazyLock::new(two_face::theme::extra);

/// Syntax definitions, newline-terminated variant for `LinesWithEndings`.
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(two_face::syntax::extra_newlines);

/// Code block highlighter bound to one palette.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    theme: EmbeddedThemeName,
}

impl SyntaxHighlighter {
    /// Create a highlighter for the given palette.
    pub fn new(theme: EmbeddedThemeName) -> Self {
        Self { theme }
    }

    /// Highlight `code`, looking the language up by token (`rs`, `rust`,
    /// `py`, ...). Unknown languages are highlighted as plain text.
    ///
    /// # Errors
    ///
    /// [`RenderError::Highlight`] if syntect fails on a line.
    pub fn highlight(&self, code: &str, language: &str) -> Result<Vec<Line<'static>>, RenderError> {
        let syntax = SYNTAX_SET
            .find_syntax_by_token(language)
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, THEME_SET.get(self.theme));

        LinesWithEndings::from(code)
            .map(|line| {
                let ranges = highlighter
                    .highlight_line(line, &SYNTAX_SET)
                    .map_err(|e| RenderError::Highlight {
                        language: language.to_string(),
                        reason: e.to_string(),
                    })?;

                let spans: Vec<Span<'static>> = ranges
                    .into_iter()
                    .filter_map(|(style, text)| {
                        let text = text.trim_end_matches(['\n', '\r']);
                        (!text.is_empty())
                            .then(|| Span::styled(text.to_string(), syntect_style_to_ratatui(style)))
                    })
                    .collect();
                Ok(Line::from(spans))
            })
            .collect()
    }
}

/// Convert syntect highlighting style to ratatui style.
///
/// Only the foreground is carried over; the slide background stays the
/// terminal's own.
fn syntect_style_to_ratatui(style: syntect::highlighting::Style) -> Style {
    let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);
    let mut ratatui_style = Style::default().fg(fg);

    for (font, modifier) in [
        (FontStyle::BOLD, Modifier::BOLD),
        (FontStyle::ITALIC, Modifier::ITALIC),
        (FontStyle::UNDERLINE, Modifier::UNDERLINED),
    ] {
        if style.font_style.contains(font) {
            ratatui_style = ratatui_style.add_modifier(modifier);
        }
    }

    ratatui_style
}
