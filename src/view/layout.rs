//! Frame layout: slide area, spacer, status bar.

use crate::state::Presentation;
use crate::view::search_input::SearchInput;
use crate::view::styles::ChromeStyles;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Horizontal padding around the slide content.
const SLIDE_MARGIN: u16 = 2;

/// Split the frame into slide area, spacer and status bar.
pub fn split(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Slide
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let slide = Rect {
        x: chunks[0].x.saturating_add(SLIDE_MARGIN),
        width: chunks[0].width.saturating_sub(SLIDE_MARGIN * 2),
        ..chunks[0]
    };
    (slide, chunks[2])
}

/// Slide text as a wrapping paragraph, not yet scrolled.
///
/// `Paragraph::line_count` on the result gives the wrapped height the scroll
/// offset is bounded by.
pub fn slide_paragraph(text: Text<'static>) -> Paragraph<'static> {
    Paragraph::new(text).wrap(Wrap { trim: false })
}

/// Wrapped height in rows of a slide paragraph at `width`.
pub fn content_height(paragraph: &Paragraph<'_>, width: u16) -> u16 {
    u16::try_from(paragraph.line_count(width)).unwrap_or(u16::MAX)
}

/// Render the whole frame around an already scrolled slide paragraph.
pub fn render_layout(
    frame: &mut Frame,
    presentation: &Presentation,
    slide: Paragraph<'_>,
    styles: &ChromeStyles,
) {
    let (slide_area, status_area) = split(frame.area());
    frame.render_widget(slide, slide_area);

    let status = status_line(presentation, styles, status_area.width);
    frame.render_widget(Paragraph::new(status), status_area);
}

/// Status bar: author and date (or the search prompt) on the left, paging
/// right-aligned. When both do not fit, paging wins.
pub fn status_line(
    presentation: &Presentation,
    styles: &ChromeStyles,
    width: u16,
) -> Line<'static> {
    let left = SearchInput::new(presentation.search(), styles.search)
        .line()
        .unwrap_or_else(|| {
            Line::from(vec![
                Span::raw(" "),
                Span::styled(presentation.author().to_string(), styles.author),
                Span::raw(" "),
                Span::styled(presentation.date().to_string(), styles.date),
            ])
        });
    let paging = format!("{} ", presentation.paging());

    let width = usize::from(width);
    let left_width = left.width();
    let paging_width = paging.width();

    if left_width + paging_width > width {
        return Line::from(Span::styled(paging, styles.paging)).right_aligned();
    }

    let mut spans = left.spans;
    spans.push(Span::raw(" ".repeat(width - left_width - paging_width)));
    spans.push(Span::styled(paging, styles.paging));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::ProcessExecutor;
    use crate::config::KeyBindings;
    use crate::state::Message;
    use crate::view::styles::ColorConfig;
    use crate::view::theme::SlideTheme;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn presentation(content: &str) -> Presentation {
        Presentation::new(content, KeyBindings::default(), Box::new(ProcessExecutor))
    }

    fn styles() -> ChromeStyles {
        ChromeStyles::new(ColorConfig::new(false), &SlideTheme::resolve("default"))
    }

    #[test]
    fn split_leaves_spacer_and_status_row() {
        let (slide, status) = split(Rect::new(0, 0, 80, 24));
        assert_eq!(slide, Rect::new(2, 0, 76, 22));
        assert_eq!(status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn content_height_counts_wrapped_rows() {
        let words = vec!["word"; 30].join(" ");
        let paragraph = slide_paragraph(Text::from(vec![Line::from(words), Line::from("end")]));

        // 149 columns of words wrap to 3 rows at width 56, plus one short line.
        assert_eq!(content_height(&paragraph, 56), 4);
        assert_eq!(content_height(&paragraph, 200), 2);
    }

    #[test]
    fn status_line_fills_width_with_paging_on_right() {
        let p = presentation("author: Ada\ndate: \"x\"\n---\n# One\n---\n# Two");
        let line = status_line(&p, &styles(), 40);
        let text = line.to_string();

        assert_eq!(text.width(), 40);
        assert!(text.starts_with(" Ada x"));
        assert!(text.ends_with("Slide 1 / 2 "));
    }

    #[test]
    fn status_line_shows_search_prompt_while_editing() {
        let mut p = presentation("a\n---\nb");
        p.update(Message::Key(KeyEvent::new(
            KeyCode::Char('/'),
            KeyModifiers::NONE,
        )));
        p.update(Message::Key(KeyEvent::new(
            KeyCode::Char('b'),
            KeyModifiers::NONE,
        )));

        let text = status_line(&p, &styles(), 40).to_string();
        assert!(text.starts_with("/b "));
    }

    #[test]
    fn narrow_status_line_keeps_paging() {
        let p = presentation("author: A very long author name indeed\n---\n# One\n---\n# Two");
        let text = status_line(&p, &styles(), 14).to_string();
        assert_eq!(text, "Slide 1 / 2 ");
    }
}
