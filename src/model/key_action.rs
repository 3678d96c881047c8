//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
///
/// Keys typed while the search prompt is open never reach this mapping,
/// except for find-next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Slide navigation
    /// Advance one slide (or N with a numeric prefix). Default: space/j/l/n/→/↓/Enter/PageDown
    NextSlide,
    /// Go back one slide (or N with a numeric prefix). Default: k/h/p/N/←/↑/PageUp
    PrevSlide,
    /// Jump to the first slide. Default: Home
    FirstSlide,
    /// Jump to the last slide, or to slide N with a numeric prefix. Default: G/End
    LastSlide,
    /// First half of the two-key `gg` command. Default: g
    GotoPrefix,
    /// Numeric prefix digit. Default: 0-9
    Digit(u8),

    // Scrolling within a slide
    /// Scroll the current slide down. Default: Ctrl+d
    ScrollDown,
    /// Scroll the current slide up. Default: Ctrl+u
    ScrollUp,

    // Search
    /// Open the search prompt. Default: /
    StartSearch,
    /// Repeat the last search from the current slide. Default: Ctrl+n
    FindNext,

    // Code
    /// Run the code blocks on the current slide. Default: Ctrl+e
    RunCode,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Parse the config-file name of an action (e.g. `"next_slide"`).
    ///
    /// Digits are not rebindable and have no config name.
    pub fn from_config_name(name: &str) -> Option<Self> {
        let action = match name {
            "next_slide" => KeyAction::NextSlide,
            "prev_slide" => KeyAction::PrevSlide,
            "first_slide" => KeyAction::FirstSlide,
            "last_slide" => KeyAction::LastSlide,
            "goto_prefix" => KeyAction::GotoPrefix,
            "scroll_down" => KeyAction::ScrollDown,
            "scroll_up" => KeyAction::ScrollUp,
            "start_search" => KeyAction::StartSearch,
            "find_next" => KeyAction::FindNext,
            "run_code" => KeyAction::RunCode,
            "quit" => KeyAction::Quit,
            _ => return None,
        };
        Some(action)
    }

    /// Whether this action is handled before navigation routing.
    pub fn is_global(self) -> bool {
        matches!(
            self,
            KeyAction::Quit | KeyAction::StartSearch | KeyAction::FindNext | KeyAction::RunCode
        )
    }
}
