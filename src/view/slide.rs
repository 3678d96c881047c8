//! Slide rendering: markdown prose via tui-markdown, fenced code via the
//! syntax highlighter, virtual text appended underneath.

use crate::model::RenderError;
use crate::view::highlighter::SyntaxHighlighter;
use crate::view::styles::ChromeStyles;
use crate::view::theme::SlideTheme;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};

/// Piece of a slide: markdown prose or one fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Prose(String),
    Code { language: String, body: String },
}

/// Split a slide into prose and fenced code blocks.
///
/// A fence is a line starting with three backticks or tildes; it closes on a
/// line holding the same fence. An unclosed fence runs to the end.
fn segments(slide: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut prose: Vec<&str> = Vec::new();
    let mut code: Option<(&str, String, Vec<&str>)> = None;

    for line in slide.lines() {
        let trimmed = line.trim_start();

        if let Some((fence, language, body)) = &mut code {
            if trimmed.trim_end() == *fence {
                out.push(Segment::Code {
                    language: std::mem::take(language),
                    body: body.join("\n"),
                });
                code = None;
            } else {
                body.push(line);
            }
            continue;
        }

        match ["```", "~~~"].into_iter().find(|f| trimmed.starts_with(f)) {
            Some(fence) => {
                if !prose.is_empty() {
                    out.push(Segment::Prose(prose.join("\n")));
                    prose.clear();
                }
                let language = trimmed[fence.len()..].trim().to_string();
                code = Some((fence, language, Vec::new()));
            }
            None => prose.push(line),
        }
    }

    if let Some((_, language, body)) = code {
        out.push(Segment::Code {
            language,
            body: body.join("\n"),
        });
    }
    if !prose.is_empty() {
        out.push(Segment::Prose(prose.join("\n")));
    }
    out
}

/// Render markdown prose into owned lines.
fn render_markdown(markdown: &str) -> Vec<Line<'static>> {
    tui_markdown::from_str(markdown)
        .lines
        .into_iter()
        .map(|line| {
            let spans: Vec<Span<'static>> = line
                .spans
                .into_iter()
                .map(|span| Span {
                    content: span.content.into_owned().into(),
                    style: line.style.patch(span.style),
                })
                .collect();
            let mut owned = Line::from(spans);
            owned.alignment = line.alignment;
            owned
        })
        .collect()
}

/// Drop colours, keep emphasis.
fn strip_colors(style: Style) -> Style {
    Style::default()
        .add_modifier(style.add_modifier)
        .remove_modifier(style.sub_modifier)
}

/// Render a slide.
///
/// # Errors
///
/// [`RenderError`] if a code block fails to highlight.
pub fn try_render(slide: &str, theme: &SlideTheme) -> Result<Vec<Line<'static>>, RenderError> {
    let mut lines = Vec::new();

    for segment in segments(slide) {
        match segment {
            Segment::Prose(text) => lines.extend(render_markdown(&text)),
            Segment::Code { language, body } => match theme.syntax() {
                Some(palette) => {
                    lines.extend(SyntaxHighlighter::new(palette).highlight(&body, &language)?)
                }
                None => lines.extend(body.lines().map(|l| Line::from(l.to_string()))),
            },
        }
    }

    if theme.is_plain() {
        for line in &mut lines {
            line.style = strip_colors(line.style);
            for span in &mut line.spans {
                span.style = strip_colors(span.style);
            }
        }
    }

    Ok(lines)
}

/// Render a slide with its virtual text, or the error message if rendering
/// fails.
pub fn render_slide(
    slide: &str,
    virtual_text: &str,
    theme: &SlideTheme,
    styles: &ChromeStyles,
) -> Text<'static> {
    compose(try_render(slide, theme), virtual_text, styles)
}

/// Rendered lines, or the error message in their place, followed by the
/// virtual text.
fn compose(
    rendered: Result<Vec<Line<'static>>, RenderError>,
    virtual_text: &str,
    styles: &ChromeStyles,
) -> Text<'static> {
    let mut lines = match rendered {
        Ok(lines) => lines,
        Err(e) => vec![Line::styled(
            format!("Error: Could not render markdown! ({e})"),
            styles.error,
        )],
    };

    if !virtual_text.is_empty() {
        lines.push(Line::default());
        lines.extend(
            virtual_text
                .lines()
                .map(|l| Line::styled(l.to_string(), styles.virtual_text)),
        );
    }

    Text::from(lines)
}
