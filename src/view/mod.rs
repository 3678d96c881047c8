//! TUI rendering and terminal management (impure shell)

pub mod highlighter;
pub mod layout;
mod search_input;
pub mod slide;
pub mod styles;
pub mod theme;

pub use search_input::SearchInput;
pub use styles::{ChromeStyles, ColorConfig};
pub use theme::SlideTheme;

use crate::model::AppError;
use crate::state::{Command, Message, Presentation};
use crossterm::{
    event::{self, Event},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Poll timeout when no reload is scheduled.
const IDLE_POLL: Duration = Duration::from_secs(60);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(e) => AppError::Terminal(e),
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    presentation: Presentation,
    color: ColorConfig,
    /// When the next reload tick fires, if one is scheduled.
    reload_deadline: Option<Instant>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(presentation: Presentation, color: ColorConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            presentation,
            color,
            reload_deadline: None,
        })
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Run the main event loop
    ///
    /// Returns when the presentation asks to quit. Between keys the loop
    /// sleeps until the next reload deadline, so an idle presenter costs
    /// nothing.
    pub fn run(&mut self) -> Result<(), TuiError> {
        let init = self.presentation.init();
        if self.apply(init)? {
            return Ok(());
        }

        let size = self.terminal.size()?;
        let resize = Message::Resize {
            width: size.width,
            height: size.height,
        };
        // Draws the first frame, measuring the slide area.
        if self.dispatch(resize)? {
            return Ok(());
        }

        loop {
            let timeout = self
                .reload_deadline
                .map(|deadline| deadline.saturating_duration_since(Instant::now()))
                .unwrap_or(IDLE_POLL);

            if event::poll(timeout)? {
                let message = match event::read()? {
                    Event::Key(key) => Some(Message::Key(key)),
                    Event::Resize(width, height) => Some(Message::Resize { width, height }),
                    _ => None,
                };
                if let Some(message) = message {
                    if self.dispatch(message)? {
                        return Ok(());
                    }
                }
            }

            if self
                .reload_deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
            {
                self.reload_deadline = None;
                if self.dispatch(Message::ReloadTick)? {
                    return Ok(());
                }
            }
        }
    }

    /// Feed one message to the presentation and carry out its commands.
    ///
    /// Returns true if app should quit
    fn dispatch(&mut self, message: Message) -> Result<bool, TuiError> {
        let commands = self.presentation.update(message);
        self.apply(commands)
    }

    /// Carry out commands. Returns true on [`Command::Quit`].
    fn apply(&mut self, commands: Vec<Command>) -> Result<bool, TuiError> {
        let mut redraw = false;
        for command in commands {
            match command {
                Command::Quit => {
                    info!("Quit requested");
                    return Ok(true);
                }
                Command::ScheduleReload(delay) => {
                    self.reload_deadline = Some(Instant::now() + delay);
                }
                Command::Redraw => redraw = true,
            }
        }
        if redraw {
            self.draw()?;
        }
        Ok(false)
    }

    /// Render the current frame
    ///
    /// The theme is resolved per frame since a reload can change it.
    ///
    /// The slide is measured at the current width first, so the scroll offset
    /// is clamped to what actually wraps onto the screen.
    fn draw(&mut self) -> Result<(), TuiError> {
        let theme = SlideTheme::resolve(self.presentation.theme());
        let styles = ChromeStyles::new(self.color, &theme);

        let size = self.terminal.size()?;
        let (slide_area, _) = layout::split(Rect::new(0, 0, size.width, size.height));
        let text = slide::render_slide(
            self.presentation.current_slide(),
            self.presentation.virtual_text(),
            &theme,
            &styles,
        );
        let paragraph = layout::slide_paragraph(text);
        self.presentation.set_layout(
            slide_area.height,
            layout::content_height(&paragraph, slide_area.width),
        );
        let paragraph = paragraph.scroll((self.presentation.scroll(), 0));

        let presentation = &self.presentation;
        self.terminal.draw(|frame| {
            layout::render_layout(frame, presentation, paragraph, &styles);
        })?;

        Ok(())
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without touching the real terminal.
    pub(crate) fn new_for_test(terminal: Terminal<B>, presentation: Presentation) -> Self {
        Self {
            terminal,
            presentation,
            color: ColorConfig::new(false),
            reload_deadline: None,
        }
    }

    /// Dispatch a message (test-only accessor). Returns true if app should quit.
    pub(crate) fn dispatch_test(&mut self, message: Message) -> bool {
        self.dispatch(message).unwrap()
    }

    /// Apply init commands and draw once, like the start of [`TuiApp::run`].
    pub(crate) fn start_test(&mut self) -> Result<(), TuiError> {
        let init = self.presentation.init();
        self.apply(init)?;
        self.draw()
    }

    pub(crate) fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub(crate) fn reload_deadline(&self) -> Option<Instant> {
        self.reload_deadline
    }
}

/// Initialize and run the TUI for a presentation.
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(presentation: Presentation, color: ColorConfig) -> Result<(), TuiError> {
    debug!(live = presentation.is_live(), "Starting presentation");
    let mut app = TuiApp::new(presentation, color)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{CodeBlock, CodeExecutor};
    use crate::config::KeyBindings;
    use crate::model::CodeError;
    use crate::source::WatchedFile;
    use crate::state::ReloadMonitor;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::time::SystemTime;

    struct NoopExecutor;

    impl CodeExecutor for NoopExecutor {
        fn execute(&self, block: &CodeBlock) -> Result<String, CodeError> {
            Ok(format!("ran {}", block.language))
        }
    }

    struct StaticFile;

    impl WatchedFile for StaticFile {
        fn modified(&self) -> io::Result<SystemTime> {
            Ok(SystemTime::UNIX_EPOCH)
        }

        fn read(&self) -> Result<String, crate::model::InputError> {
            Ok(String::new())
        }
    }

    fn create_test_app(content: &str) -> TuiApp<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let presentation = Presentation::new(content, KeyBindings::default(), Box::new(NoopExecutor));
        let mut app = TuiApp::new_for_test(terminal, presentation);
        app.dispatch_test(Message::Resize {
            width: 60,
            height: 12,
        });
        app
    }

    fn screen(app: &TuiApp<TestBackend>) -> String {
        let buffer = app.terminal().backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn key(code: KeyCode) -> Message {
        Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }

    #[test]
    fn tui_error_becomes_terminal_app_error() {
        let tui_err = TuiError::Io(io::Error::other("tty gone"));
        let app_err: AppError = tui_err.into();
        assert!(matches!(app_err, AppError::Terminal(_)));
        assert!(app_err.to_string().contains("tty gone"));
    }

    #[test]
    fn draw_renders_slide_and_status_bar() {
        let mut app = create_test_app("author: Ada\n---\n# Welcome\n---\n# Second");
        app.start_test().unwrap();

        let screen = screen(&app);
        assert!(screen.contains("Welcome"), "screen:\n{screen}");
        assert!(screen.contains("Ada"));
        assert!(screen.contains("Slide 1 / 2"));
    }

    #[test]
    fn next_key_redraws_with_new_slide() {
        let mut app = create_test_app("# Welcome\n---\n# Second");
        app.start_test().unwrap();

        assert!(!app.dispatch_test(key(KeyCode::Char('l'))));

        let screen = screen(&app);
        assert!(screen.contains("Second"), "screen:\n{screen}");
        assert!(screen.contains("Slide 2 / 2"));
        assert_eq!(app.presentation().current_page(), 1);
    }

    #[test]
    fn long_wrapped_slide_scrolls_to_its_end() {
        let words: Vec<String> = (0..300).map(|i| format!("w{i}")).collect();
        let mut app = create_test_app(&format!("{} ENDMARK", words.join(" ")));
        app.start_test().unwrap();
        assert!(!screen(&app).contains("ENDMARK"));

        for _ in 0..20 {
            app.dispatch_test(Message::Key(KeyEvent::new(
                KeyCode::Char('d'),
                KeyModifiers::CONTROL,
            )));
        }

        let screen = screen(&app);
        assert!(screen.contains("ENDMARK"), "screen:\n{screen}");
        assert!(app.presentation().scroll() > 1);
    }

    #[test]
    fn quit_key_returns_true() {
        let mut app = create_test_app("# One");
        assert!(app.dispatch_test(key(KeyCode::Char('q'))));
    }

    #[test]
    fn ctrl_c_returns_true() {
        let mut app = create_test_app("# One");
        assert!(app.dispatch_test(Message::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        ))));
    }

    #[test]
    fn run_code_output_is_drawn_under_slide() {
        let mut app = create_test_app("```sh\necho hi\n```");
        app.start_test().unwrap();

        app.dispatch_test(Message::Key(KeyEvent::new(
            KeyCode::Char('e'),
            KeyModifiers::CONTROL,
        )));

        assert!(screen(&app).contains("ran sh"));
    }

    #[test]
    fn search_prompt_is_drawn_in_status_bar() {
        let mut app = create_test_app("# One\n---\n# Two");
        app.start_test().unwrap();

        app.dispatch_test(key(KeyCode::Char('/')));
        app.dispatch_test(key(KeyCode::Char('T')));

        assert!(screen(&app).contains("/T"));
    }

    #[test]
    fn static_presentation_schedules_no_reload() {
        let mut app = create_test_app("# One");
        app.start_test().unwrap();
        assert!(app.reload_deadline().is_none());
    }

    #[test]
    fn live_presentation_schedules_reload_on_start_and_tick() {
        let terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        let monitor = ReloadMonitor::new(Box::new(StaticFile), Duration::from_millis(250));
        let presentation =
            Presentation::new("# One", KeyBindings::default(), Box::new(NoopExecutor))
                .with_reload(monitor);
        let mut app = TuiApp::new_for_test(terminal, presentation);

        app.start_test().unwrap();
        let first = app.reload_deadline().expect("reload should be armed");

        assert!(!app.dispatch_test(Message::ReloadTick));
        let second = app.reload_deadline().expect("reload should be re-armed");
        assert!(second >= first);
    }

    #[test]
    fn ascii_theme_draws_without_panicking() {
        let mut app = create_test_app("theme: ascii\n---\n# Plain\n```rust\nlet x = 1;\n```");
        app.start_test().unwrap();
        assert!(screen(&app).contains("let x = 1;"));
    }
}
