//! Keyboard bindings configuration.

use crate::config::loader::ConfigError;
use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::{BTreeMap, HashMap};

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings with option to override via configuration.
/// Character keys are stored and looked up without the SHIFT modifier, since
/// terminals disagree on whether `G` arrives with it.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&normalize(key)).copied()
    }

    fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(normalize(key), action);
    }

    /// Replace the keys of each listed action.
    ///
    /// Every action named in `overrides` loses its default keys and gets the
    /// listed ones instead. Actions not mentioned keep their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidKeyBinding`] for an unknown action name or a key
    /// string [`parse_key`] cannot read.
    pub fn with_overrides(
        mut self,
        overrides: &BTreeMap<String, Vec<String>>,
    ) -> Result<Self, ConfigError> {
        for (name, keys) in overrides {
            let action =
                KeyAction::from_config_name(name).ok_or_else(|| ConfigError::InvalidKeyBinding {
                    action: name.clone(),
                    key: String::new(),
                })?;

            let parsed = keys
                .iter()
                .map(|key| {
                    parse_key(key).ok_or_else(|| ConfigError::InvalidKeyBinding {
                        action: name.clone(),
                        key: key.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            self.bindings.retain(|_, bound| *bound != action);
            for key in parsed {
                self.bind(key, action);
            }
        }
        Ok(self)
    }
}

/// Drop SHIFT from character keys; the character already encodes it.
fn normalize(key: KeyEvent) -> KeyEvent {
    let modifiers = match key.code {
        KeyCode::Char(_) => key.modifiers - KeyModifiers::SHIFT,
        _ => key.modifiers,
    };
    KeyEvent::new(key.code, modifiers)
}

/// Parse a config key string such as `"j"`, `"G"`, `"space"`, `"ctrl+n"` or
/// `"pagedown"`.
pub fn parse_key(raw: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::NONE;
    let mut rest = raw;

    while let Some((prefix, tail)) = rest.split_once('+') {
        // A literal "+" key ("ctrl++") leaves an empty tail.
        if tail.is_empty() {
            break;
        }
        modifiers |= match prefix.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => return None,
        };
        rest = tail;
    }

    let code = match rest.to_ascii_lowercase().as_str() {
        "space" => KeyCode::Char(' '),
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };

    Some(normalize(KeyEvent::new(code, modifiers)))
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let plain = |code| KeyEvent::new(code, KeyModifiers::NONE);
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);

        // Next slide
        for code in [
            KeyCode::Char(' '),
            KeyCode::Char('j'),
            KeyCode::Char('l'),
            KeyCode::Char('n'),
            KeyCode::Down,
            KeyCode::Right,
            KeyCode::Enter,
            KeyCode::PageDown,
        ] {
            keys.bind(plain(code), KeyAction::NextSlide);
        }

        // Previous slide
        for code in [
            KeyCode::Char('k'),
            KeyCode::Char('h'),
            KeyCode::Char('p'),
            KeyCode::Char('N'),
            KeyCode::Up,
            KeyCode::Left,
            KeyCode::PageUp,
        ] {
            keys.bind(plain(code), KeyAction::PrevSlide);
        }

        // Absolute jumps
        keys.bind(plain(KeyCode::Char('g')), KeyAction::GotoPrefix);
        keys.bind(plain(KeyCode::Home), KeyAction::FirstSlide);
        keys.bind(plain(KeyCode::Char('G')), KeyAction::LastSlide);
        keys.bind(plain(KeyCode::End), KeyAction::LastSlide);

        // Numeric prefix
        for digit in 0..=9u8 {
            keys.bind(
                plain(KeyCode::Char(char::from(b'0' + digit))),
                KeyAction::Digit(digit),
            );
        }

        // Scrolling within a slide
        keys.bind(ctrl('d'), KeyAction::ScrollDown);
        keys.bind(ctrl('u'), KeyAction::ScrollUp);

        // Search
        keys.bind(plain(KeyCode::Char('/')), KeyAction::StartSearch);
        keys.bind(ctrl('n'), KeyAction::FindNext);

        // Code
        keys.bind(ctrl('e'), KeyAction::RunCode);

        // Application controls
        keys.bind(plain(KeyCode::Char('q')), KeyAction::Quit);
        keys.bind(ctrl('c'), KeyAction::Quit);

        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn default_bindings_cover_next_slide_keys() {
        let bindings = KeyBindings::default();
        for code in [
            KeyCode::Char(' '),
            KeyCode::Char('j'),
            KeyCode::Char('l'),
            KeyCode::Char('n'),
            KeyCode::Down,
            KeyCode::Right,
            KeyCode::Enter,
            KeyCode::PageDown,
        ] {
            assert_eq!(
                bindings.get(key(code, KeyModifiers::NONE)),
                Some(KeyAction::NextSlide),
                "{code:?} should advance"
            );
        }
    }

    #[test]
    fn uppercase_keys_match_with_or_without_shift() {
        let bindings = KeyBindings::default();

        assert_eq!(
            bindings.get(key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(KeyAction::LastSlide)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('G'), KeyModifiers::NONE)),
            Some(KeyAction::LastSlide)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('N'), KeyModifiers::SHIFT)),
            Some(KeyAction::PrevSlide),
            "Shift+n goes back while plain n goes forward"
        );
    }

    #[test]
    fn control_keys_are_distinct_from_plain_keys() {
        let bindings = KeyBindings::default();

        assert_eq!(
            bindings.get(key(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            Some(KeyAction::FindNext)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('e'), KeyModifiers::CONTROL)),
            Some(KeyAction::RunCode)
        );
        assert_eq!(bindings.get(key(KeyCode::Char('c'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn digits_map_to_digit_actions() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(key(KeyCode::Char('7'), KeyModifiers::NONE)),
            Some(KeyAction::Digit(7))
        );
    }

    #[test]
    fn parse_key_reads_names_and_modifiers() {
        assert_eq!(
            parse_key("ctrl+n"),
            Some(key(KeyCode::Char('n'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            parse_key("space"),
            Some(key(KeyCode::Char(' '), KeyModifiers::NONE))
        );
        assert_eq!(
            parse_key("PageDown"),
            Some(key(KeyCode::PageDown, KeyModifiers::NONE))
        );
        assert_eq!(
            parse_key("G"),
            Some(key(KeyCode::Char('G'), KeyModifiers::NONE))
        );
        assert_eq!(
            parse_key("ctrl++"),
            Some(key(KeyCode::Char('+'), KeyModifiers::CONTROL))
        );
    }

    #[test]
    fn parse_key_rejects_garbage() {
        assert_eq!(parse_key(""), None);
        assert_eq!(parse_key("hyper+x"), None);
        assert_eq!(parse_key("notakey"), None);
    }

    #[test]
    fn overrides_replace_action_keys() {
        let overrides = BTreeMap::from([("quit".to_string(), vec!["x".to_string()])]);
        let bindings = KeyBindings::default().with_overrides(&overrides).unwrap();

        assert_eq!(
            bindings.get(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            None,
            "Default quit key is replaced"
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(KeyAction::NextSlide),
            "Other actions keep their defaults"
        );
    }

    #[test]
    fn override_with_unknown_action_is_error() {
        let overrides = BTreeMap::from([("explode".to_string(), vec!["x".to_string()])]);
        let err = KeyBindings::default()
            .with_overrides(&overrides)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidKeyBinding {
                action: "explode".to_string(),
                key: String::new(),
            }
        );
    }

    #[test]
    fn override_with_bad_key_is_error() {
        let overrides = BTreeMap::from([("quit".to_string(), vec!["meta+q".to_string()])]);
        assert!(matches!(
            KeyBindings::default().with_overrides(&overrides),
            Err(ConfigError::InvalidKeyBinding { key, .. }) if key == "meta+q"
        ));
    }
}
