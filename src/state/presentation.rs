//! Presentation state and message handling.
//!
//! Presentation is the aggregate the event loop drives. It owns the slides,
//! the navigation accumulator, the search sub-state machine and the
//! virtual-text overlay, and turns each [`Message`] into zero or more
//! [`Command`]s for the loop to carry out.
//!
//! # Key routing
//!
//! While the search editor is open every key goes to it. Otherwise global
//! actions (quit, search, find-next, run-code) are intercepted first, then
//! scrolling, and everything else feeds the navigation accumulator.

use crate::code::{self, CodeExecutor};
use crate::config::KeyBindings;
use crate::model::{render_paging, KeyAction, Metadata};
use crate::parser;
use crate::state::navigation::{self, NavKey, NavigationState};
use crate::state::reload::ReloadMonitor;
use crate::state::search::{self, SearchState};
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tracing::{debug, info};

/// Discrete input to the presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A key press.
    Key(KeyEvent),
    /// The reload deadline elapsed.
    ReloadTick,
    /// The terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

/// Follow-up work for the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Stop the loop.
    Quit,
    /// Fire [`Message::ReloadTick`] after this delay.
    ScheduleReload(Duration),
    /// State changed; draw a new frame.
    Redraw,
}

/// Aggregate presentation state.
pub struct Presentation {
    slides: Vec<String>,
    nav: NavigationState,
    metadata: Metadata,
    date: String,
    theme: String,
    theme_override: Option<String>,
    search: SearchState,
    virtual_text: String,
    scroll: u16,
    viewport_height: u16,
    content_height: u16,
    reload: Option<ReloadMonitor>,
    key_bindings: KeyBindings,
    executor: Box<dyn CodeExecutor>,
}

impl std::fmt::Debug for Presentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presentation")
            .field("slides", &self.slides.len())
            .field("nav", &self.nav)
            .field("theme", &self.theme)
            .field("search", &self.search)
            .field("reload", &self.reload)
            .finish_non_exhaustive()
    }
}

impl Presentation {
    /// Build the presentation from the initial document text.
    pub fn new(content: &str, key_bindings: KeyBindings, executor: Box<dyn CodeExecutor>) -> Self {
        let mut presentation = Self {
            slides: Vec::new(),
            nav: NavigationState::default(),
            metadata: Metadata::default(),
            date: String::new(),
            theme: String::new(),
            theme_override: None,
            search: SearchState::default(),
            virtual_text: String::new(),
            scroll: 0,
            viewport_height: 0,
            content_height: 0,
            reload: None,
            key_bindings,
            executor,
        };
        presentation.load(content);
        presentation
    }

    /// Pin the theme. It then survives reloads regardless of metadata.
    pub fn with_theme_override(mut self, theme: Option<String>) -> Self {
        if let Some(theme) = &theme {
            self.theme = theme.clone();
        }
        self.theme_override = theme;
        self
    }

    /// Attach a live-reload monitor.
    pub fn with_reload(mut self, monitor: ReloadMonitor) -> Self {
        self.reload = Some(monitor);
        self
    }

    /// Commands to run before the first message: arms the first reload tick.
    pub fn init(&self) -> Vec<Command> {
        self.reload
            .as_ref()
            .map(|monitor| vec![Command::ScheduleReload(monitor.interval())])
            .unwrap_or_default()
    }

    /// Handle one message.
    pub fn update(&mut self, message: Message) -> Vec<Command> {
        match message {
            Message::Key(key) => self.handle_key(key),
            Message::ReloadTick => self.handle_reload_tick(),
            // The view measures the new slide area on the redraw.
            Message::Resize { .. } => vec![Command::Redraw],
        }
    }

    /// Replace slides and metadata with a freshly parsed document.
    ///
    /// The page is clamped if the deck shrank. An explicit theme is kept.
    pub fn load(&mut self, content: &str) {
        self.load_at(content, Local::now());
    }

    fn load_at(&mut self, content: &str, now: DateTime<Local>) {
        let parsed = parser::parse(content);
        debug!(
            slides = parsed.slides.len(),
            had_metadata = parsed.had_metadata,
            "Parsed presentation"
        );

        self.slides = parsed.slides;
        self.date = parsed.metadata.format_date(now);
        self.theme = self
            .theme_override
            .clone()
            .unwrap_or_else(|| parsed.metadata.theme.clone());
        self.metadata = parsed.metadata;
        self.nav.total_slides = self.slides.len();

        let last = self.slides.len().saturating_sub(1);
        if self.nav.page > last {
            self.set_page(last);
        }
    }

    /// Move to `page`. A no-op when already there; otherwise clears the
    /// virtual text and resets scrolling.
    pub fn set_page(&mut self, page: usize) {
        if page == self.nav.page {
            return;
        }
        self.nav.page = page;
        self.virtual_text.clear();
        self.scroll = 0;
    }

    // ===== accessors =====

    /// Current 0-based page.
    pub fn current_page(&self) -> usize {
        self.nav.page
    }

    /// All slides.
    pub fn slides(&self) -> &[String] {
        &self.slides
    }

    /// Text of the current slide.
    pub fn current_slide(&self) -> &str {
        self.slides
            .get(self.nav.page)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Status-bar paging string for the current page.
    pub fn paging(&self) -> String {
        render_paging(&self.metadata.paging, self.nav.page, self.slides.len())
    }

    /// Presentation author.
    pub fn author(&self) -> &str {
        &self.metadata.author
    }

    /// Date resolved at load time.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Effective theme name.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Overlay text shown below the current slide.
    pub fn virtual_text(&self) -> &str {
        &self.virtual_text
    }

    /// Search sub-state.
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// Pending navigation keystrokes.
    pub fn buffer(&self) -> &str {
        &self.nav.buffer
    }

    /// Record the slide area height and the rendered (wrapped) height of the
    /// current slide, both in rows. The view calls this before each frame;
    /// the scroll offset is clamped to the new bounds.
    pub fn set_layout(&mut self, viewport_height: u16, content_height: u16) {
        self.viewport_height = viewport_height;
        self.content_height = content_height;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Vertical scroll offset within the current slide.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Whether live reload is active.
    pub fn is_live(&self) -> bool {
        self.reload.is_some()
    }

    // ===== handlers =====

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }

        if self.search.is_active() {
            self.handle_search_key(key);
            return vec![Command::Redraw];
        }

        let action = self.key_bindings.get(key);
        if action.is_some_and(KeyAction::is_global) {
            self.nav.buffer.clear();
        }

        match action {
            Some(KeyAction::Quit) => return vec![Command::Quit],
            Some(KeyAction::StartSearch) => {
                self.search = search::activate_search_input(std::mem::take(&mut self.search));
            }
            Some(KeyAction::FindNext) => self.find_next(),
            Some(KeyAction::RunCode) => self.run_code(),
            Some(KeyAction::ScrollDown) => {
                self.nav.buffer.clear();
                self.scroll = self
                    .scroll
                    .saturating_add(self.scroll_step())
                    .min(self.max_scroll());
            }
            Some(KeyAction::ScrollUp) => {
                self.nav.buffer.clear();
                self.scroll = self.scroll.saturating_sub(self.scroll_step());
            }
            other => {
                let target = navigation::navigate(self.nav.clone(), NavKey::from(other));
                self.nav.buffer = target.buffer;
                self.set_page(target.page);
            }
        }

        vec![Command::Redraw]
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let state = std::mem::take(&mut self.search);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        self.search = match key.code {
            KeyCode::Enter => {
                let (state, query) = search::submit_search(state);
                if let Some(query) = query {
                    self.search_from_current(&query);
                }
                state
            }
            KeyCode::Esc => search::cancel_search(state),
            KeyCode::Char('c') if ctrl => search::cancel_search(state),
            KeyCode::Backspace => search::handle_backspace(state),
            _ if self.key_bindings.get(key) == Some(KeyAction::FindNext) => {
                let (state, query) = search::submit_search(state);
                if let Some(query) = query {
                    self.search_from_current(&query);
                }
                state
            }
            KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                search::handle_char_input(state, ch)
            }
            _ => state,
        };
    }

    fn find_next(&mut self) {
        if let Some(query) = self.search.current_query() {
            self.search_from_current(&query);
        }
    }

    fn search_from_current(&mut self, query: &search::SearchQuery) {
        match search::find_next(&self.slides, self.nav.page, query) {
            Some(page) => {
                debug!(query = query.as_str(), page, "Search match");
                self.set_page(page);
            }
            None => debug!(query = query.as_str(), "Search found no other slide"),
        }
    }

    fn run_code(&mut self) {
        let output = code::run_slide(self.current_slide(), self.executor.as_ref());
        debug!(page = self.nav.page, "Ran code blocks");
        self.virtual_text = output;
    }

    fn handle_reload_tick(&mut self) -> Vec<Command> {
        let Some(monitor) = self.reload.as_mut() else {
            return Vec::new();
        };
        let interval = monitor.interval();

        match monitor.check() {
            Some(content) => {
                self.load(&content);
                info!(slides = self.slides.len(), "Reloaded presentation");
                vec![Command::ScheduleReload(interval), Command::Redraw]
            }
            None => vec![Command::ScheduleReload(interval)],
        }
    }

    fn scroll_step(&self) -> u16 {
        (self.viewport_height / 2).max(1)
    }

    /// Upper bound for the scroll offset: the last rendered row sits at the
    /// bottom of the slide area.
    fn max_scroll(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "presentation_tests.rs"]
mod tests;
