//! Slide input sources.
//!
//! This module provides input acquisition for the presenter:
//! - File reading with executable-file sanitization (reloadable)
//! - Stdin for piped input (read once)
//! - Unified InputSource enum for both

use crate::model::error::InputError;
use std::io;
use std::path::PathBuf;
use std::time::SystemTime;

pub mod file;
pub mod preprocess;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// A document whose modification time can be observed.
///
/// The live-reload monitor only talks to this trait, so tests can drive it
/// with in-memory fakes.
pub trait WatchedFile {
    /// Current modification timestamp.
    fn modified(&self) -> io::Result<SystemTime>;

    /// Current full content, sanitized like the initial load.
    fn read(&self) -> Result<String, InputError>;
}

/// Unified input source for slide text.
///
/// Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum InputSource {
    /// Named file - reloadable
    File(FileSource),
    /// Piped stdin - buffered at construction
    Stdin(StdinSource),
}

impl InputSource {
    /// Full text of the presentation as it is right now.
    ///
    /// # Errors
    ///
    /// Returns `InputError` if the file can no longer be read.
    pub fn read(&self) -> Result<String, InputError> {
        match self {
            InputSource::File(f) => f.read(),
            InputSource::Stdin(s) => Ok(s.content().to_string()),
        }
    }

    /// Whether the source can change after startup.
    ///
    /// # Behavior:
    /// - File: true (live reload)
    /// - Stdin: false (read once)
    pub fn is_live(&self) -> bool {
        matches!(self, InputSource::File(_))
    }
}

/// Detect and create appropriate input source.
///
/// # Logic:
/// 1. If file path is provided: create FileSource
/// 2. Else: buffer stdin (fails with NoInput on a TTY or empty pipe)
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin has no data.
/// Returns `InputError::FileNotFound` / `IsDirectory` for bad paths.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::IsTerminal;

    #[test]
    fn detect_returns_file_source_for_existing_file() {
        let test_file = std::env::temp_dir().join("slides_detect_test_existing_file.md");
        fs::write(&test_file, "# Test\n").unwrap();

        let result = detect_input_source(Some(test_file.clone()));

        let _ = fs::remove_file(&test_file);
        let source = result.unwrap();
        assert!(
            matches!(source, InputSource::File(_)),
            "Should be File variant, got: {:?}",
            source
        );
    }

    #[test]
    fn detect_returns_file_not_found_for_missing_file() {
        let missing_file = std::env::temp_dir().join("slides_nonexistent_detect_test_12345.md");

        let result = detect_input_source(Some(missing_file.clone()));

        match result {
            Err(InputError::FileNotFound { path }) => assert_eq!(path, missing_file),
            other => panic!("Should return FileNotFound for missing file, got: {:?}", other),
        }
    }

    #[test]
    fn detect_returns_no_input_when_no_file_and_stdin_is_tty() {
        // Only meaningful when the test runner has an interactive stdin
        if std::io::stdin().is_terminal() {
            let result = detect_input_source(None);
            assert!(
                matches!(result, Err(InputError::NoInput)),
                "Expected NoInput error when no file and stdin is TTY, got: {:?}",
                result
            );
        }
    }

    #[test]
    fn file_sources_are_live() {
        let test_file = std::env::temp_dir().join("slides_is_live_test_file.md");
        fs::write(&test_file, "# Test\n").unwrap();

        let source = detect_input_source(Some(test_file.clone())).unwrap();

        let _ = fs::remove_file(&test_file);
        assert!(source.is_live(), "File sources are watched for changes");
    }

    #[test]
    fn stdin_sources_are_not_live() {
        let stdin_source = StdinSource::from_reader(&b"# Piped"[..]).unwrap();
        let source = InputSource::Stdin(stdin_source);

        assert!(!source.is_live());
        assert_eq!(source.read().unwrap(), "# Piped");
    }
}
