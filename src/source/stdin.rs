//! Stdin-based slide source for piped input.
//!
//! The whole stream is buffered once at startup; piped presentations are
//! never reloaded.

use crate::model::error::InputError;
use std::io::{IsTerminal, Read};

/// Slides read from a piped stream.
#[derive(Debug, Clone)]
pub struct StdinSource {
    content: String,
}

impl StdinSource {
    /// Read all of stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is a TTY (interactive terminal)
    /// or the pipe carries no data. Returns `InputError::Io` for read errors.
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Self::from_reader(stdin.lock())
    }

    /// Buffer any reader to completion.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` for an empty stream.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, InputError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        if content.is_empty() {
            return Err(InputError::NoInput);
        }

        Ok(Self { content })
    }

    /// The buffered text.
    pub fn content(&self) -> &str {
        &self.content
    }
}
