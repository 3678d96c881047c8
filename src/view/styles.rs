//! Chrome styling: status bar, search prompt, overlay and error text.

use crate::view::theme::SlideTheme;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Explicitly enabled or disabled colors.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== ChromeStyles =====

/// Styles for everything drawn around the slide content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeStyles {
    /// Author in the status bar.
    pub author: Style,
    /// Date in the status bar.
    pub date: Style,
    /// Paging string in the status bar.
    pub paging: Style,
    /// Search prompt while editing.
    pub search: Style,
    /// Virtual-text overlay below the slide.
    pub virtual_text: Style,
    /// Render error message in place of a slide.
    pub error: Style,
}

impl ChromeStyles {
    /// Pick chrome styles for a theme.
    ///
    /// Colourless when colors are disabled or the theme is plain; modifiers
    /// (bold, dim) are kept either way so the status bar stays readable.
    pub fn new(color: ColorConfig, theme: &SlideTheme) -> Self {
        if !color.colors_enabled() || theme.is_plain() {
            return Self {
                author: Style::default().add_modifier(Modifier::BOLD),
                date: Style::default(),
                paging: Style::default(),
                search: Style::default().add_modifier(Modifier::BOLD),
                virtual_text: Style::default().add_modifier(Modifier::DIM),
                error: Style::default().add_modifier(Modifier::BOLD),
            };
        }

        let muted = if theme.is_light() {
            Color::DarkGray
        } else {
            Color::Gray
        };

        Self {
            author: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            date: Style::default().fg(muted),
            paging: Style::default().fg(muted),
            search: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            virtual_text: Style::default().fg(Color::Cyan),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

// ===== Tests =====
