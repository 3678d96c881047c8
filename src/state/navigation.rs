//! Slide navigation (pure state transitions).
//!
//! Keystrokes are fed one at a time into a small accumulator. Each keystroke
//! has exactly one of three outcomes:
//!
//! - accumulate: the key extends the pending buffer (digits, the first `g`)
//! - resolve: the key completes a command; the page moves and the buffer clears
//! - discard: the key does not complete anything; the buffer clears, page stays
//!
//! Targets always saturate into `[0, total_slides - 1]`.

use crate::model::KeyAction;

/// Buffer content meaning "first half of `gg`".
const GOTO_PREFIX: &str = "g";

/// Navigation-relevant view of a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// A numeric prefix digit (0-9).
    Digit(u8),
    /// `g`: first half of the go-to-first command.
    Goto,
    /// Jump key: last slide, or the buffered 1-based slide number.
    Last,
    /// Single-key jump to the first slide.
    First,
    /// Forward by one, or by the buffered count.
    Next,
    /// Backward by one, or by the buffered count.
    Previous,
    /// Anything that is not a navigation command.
    Other,
}

impl From<Option<KeyAction>> for NavKey {
    fn from(action: Option<KeyAction>) -> Self {
        match action {
            Some(KeyAction::Digit(d)) => NavKey::Digit(d),
            Some(KeyAction::GotoPrefix) => NavKey::Goto,
            Some(KeyAction::LastSlide) => NavKey::Last,
            Some(KeyAction::FirstSlide) => NavKey::First,
            Some(KeyAction::NextSlide) => NavKey::Next,
            Some(KeyAction::PrevSlide) => NavKey::Previous,
            _ => NavKey::Other,
        }
    }
}

/// Buffer, current page and slide count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationState {
    /// Pending command characters (digits, or a lone `g`).
    pub buffer: String,
    /// Current 0-based page.
    pub page: usize,
    /// Number of slides.
    pub total_slides: usize,
}

/// What a single keystroke does to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keystroke {
    /// Keep waiting; the buffer becomes this.
    Accumulate(String),
    /// Move to this page and clear the buffer.
    Resolve(usize),
    /// Clear the buffer, leave the page.
    Discard,
}

/// Classify a keystroke against the current state.
pub fn classify(state: &NavigationState, key: NavKey) -> Keystroke {
    let last = state.total_slides.saturating_sub(1);
    let count = buffered_count(&state.buffer);

    match key {
        NavKey::Digit(digit) => {
            let mut buffer = if count.is_some() {
                state.buffer.clone()
            } else {
                String::new()
            };
            buffer.push(char::from(b'0' + digit.min(9)));
            Keystroke::Accumulate(buffer)
        }
        NavKey::Goto if state.buffer == GOTO_PREFIX => Keystroke::Resolve(0),
        NavKey::Goto => Keystroke::Accumulate(GOTO_PREFIX.to_string()),
        NavKey::Last => match count {
            Some(n) => Keystroke::Resolve(n.saturating_sub(1).min(last)),
            None => Keystroke::Resolve(last),
        },
        NavKey::First => Keystroke::Resolve(0),
        NavKey::Next => {
            let step = repeat(count);
            Keystroke::Resolve(state.page.saturating_add(step).min(last))
        }
        NavKey::Previous => {
            let step = repeat(count);
            Keystroke::Resolve(state.page.saturating_sub(step).min(last))
        }
        NavKey::Other => Keystroke::Discard,
    }
}

/// Apply one keystroke.
pub fn navigate(state: NavigationState, key: NavKey) -> NavigationState {
    match classify(&state, key) {
        Keystroke::Accumulate(buffer) => NavigationState { buffer, ..state },
        Keystroke::Resolve(page) => NavigationState {
            buffer: String::new(),
            page,
            ..state
        },
        Keystroke::Discard => NavigationState {
            buffer: String::new(),
            ..state
        },
    }
}

/// Numeric value of an all-digit buffer. Overflow saturates.
fn buffered_count(buffer: &str) -> Option<usize> {
    if buffer.is_empty() || !buffer.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(buffer.parse().unwrap_or(usize::MAX))
}

/// Repeat count for relative moves; a missing or zero prefix means one.
fn repeat(count: Option<usize>) -> usize {
    count.filter(|n| *n > 0).unwrap_or(1)
}

// ===== Tests =====

#[cfg(test)]
#[path = "navigation_tests.rs"]
mod tests;
