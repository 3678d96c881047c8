//! Presentation theme resolution.
//!
//! A theme name picks the syntax palette for code blocks and whether the
//! slide is drawn in colour at all. Presenter names come first:
//!
//! - `default` / `dark` - dark palette
//! - `light` - light palette
//! - `dracula` - dracula palette
//! - `ascii` / `notty` - no colour, markdown emphasis only
//!
//! Any embedded two-face theme name (`gruvbox-dark`, `nord`, ...) also works.
//! Unknown names fall back to `default`.

use tracing::debug;
use two_face::theme::EmbeddedThemeName;

/// Resolved presentation theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideTheme {
    name: String,
    syntax: Option<EmbeddedThemeName>,
}

impl SlideTheme {
    /// Resolve a theme by name.
    pub fn resolve(name: &str) -> Self {
        let normalized = name.trim().to_ascii_lowercase();
        let syntax = match normalized.as_str() {
            "ascii" | "notty" => None,
            other => Some(syntax_theme(other).unwrap_or_else(|| {
                debug!(theme = name, "Unknown theme, using default");
                EmbeddedThemeName::Base16OceanDark
            })),
        };
        Self {
            name: normalized,
            syntax,
        }
    }

    /// Theme name as resolved (lowercased).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Syntax palette, or `None` for colourless themes.
    pub fn syntax(&self) -> Option<EmbeddedThemeName> {
        self.syntax
    }

    /// Whether colour is disabled for slide content.
    pub fn is_plain(&self) -> bool {
        self.syntax.is_none()
    }

    /// Whether the palette targets a light background.
    pub fn is_light(&self) -> bool {
        matches!(
            self.syntax,
            Some(
                EmbeddedThemeName::InspiredGithub
                    | EmbeddedThemeName::Base16OceanLight
                    | EmbeddedThemeName::GruvboxLight
                    | EmbeddedThemeName::OneHalfLight
                    | EmbeddedThemeName::SolarizedLight
                    | EmbeddedThemeName::MonokaiExtendedLight
                    | EmbeddedThemeName::ColdarkCold
                    | EmbeddedThemeName::Github
            )
        )
    }
}

/// Map a theme name to a two-face palette.
fn syntax_theme(name: &str) -> Option<EmbeddedThemeName> {
    let theme = match name {
        "default" | "dark" | "base16-ocean" | "base16-ocean-dark" => {
            EmbeddedThemeName::Base16OceanDark
        }
        "light" | "inspired-github" => EmbeddedThemeName::InspiredGithub,
        "dracula" => EmbeddedThemeName::Dracula,
        "base16-ocean-light" => EmbeddedThemeName::Base16OceanLight,
        "base16-eighties-dark" => EmbeddedThemeName::Base16EightiesDark,
        "base16-mocha-dark" => EmbeddedThemeName::Base16MochaDark,
        "coldark-cold" => EmbeddedThemeName::ColdarkCold,
        "coldark-dark" => EmbeddedThemeName::ColdarkDark,
        "github" => EmbeddedThemeName::Github,
        "gruvbox-dark" => EmbeddedThemeName::GruvboxDark,
        "gruvbox-light" => EmbeddedThemeName::GruvboxLight,
        "monokai" => EmbeddedThemeName::MonokaiExtended,
        "monokai-light" => EmbeddedThemeName::MonokaiExtendedLight,
        "nord" => EmbeddedThemeName::Nord,
        "one-half-dark" => EmbeddedThemeName::OneHalfDark,
        "one-half-light" => EmbeddedThemeName::OneHalfLight,
        "solarized-dark" => EmbeddedThemeName::SolarizedDark,
        "solarized-light" => EmbeddedThemeName::SolarizedLight,
        "two-dark" => EmbeddedThemeName::TwoDark,
        "zenburn" => EmbeddedThemeName::Zenburn,
        _ => return None,
    };
    Some(theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presenter_names_resolve() {
        assert_eq!(
            SlideTheme::resolve("default").syntax(),
            Some(EmbeddedThemeName::Base16OceanDark)
        );
        assert_eq!(
            SlideTheme::resolve("dark").syntax(),
            SlideTheme::resolve("default").syntax()
        );
        assert_eq!(
            SlideTheme::resolve("dracula").syntax(),
            Some(EmbeddedThemeName::Dracula)
        );
        assert!(SlideTheme::resolve("light").is_light());
    }

    #[test]
    fn ascii_and_notty_are_plain() {
        assert!(SlideTheme::resolve("ascii").is_plain());
        assert!(SlideTheme::resolve("notty").is_plain());
        assert!(!SlideTheme::resolve("default").is_plain());
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(SlideTheme::resolve("Dracula"), SlideTheme::resolve("dracula"));
        assert!(SlideTheme::resolve(" ASCII ").is_plain());
    }

    #[test]
    fn two_face_names_are_accepted() {
        assert_eq!(
            SlideTheme::resolve("gruvbox-dark").syntax(),
            Some(EmbeddedThemeName::GruvboxDark)
        );
    }

    #[test]
    fn unknown_name_falls_back_to_default_palette() {
        let theme = SlideTheme::resolve("no-such-theme");
        assert_eq!(theme.syntax(), Some(EmbeddedThemeName::Base16OceanDark));
        assert_eq!(theme.name(), "no-such-theme");
    }
}
