//! Error types for the slides application.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all fatal failures
//!   - [`InputError`] - Slide file/stdin acquisition failures (not found, directory, no input, IO)
//!   - `std::io::Error` - Terminal/TUI failures
//! - [`RenderError`] - Markdown or code highlighting failure for a single slide
//! - [`CodeError`] - Code block extraction/execution failure
//!
//! # Error Recovery Strategy
//!
//! Only acquisition errors at startup are fatal. Everything that can go wrong
//! while presenting degrades instead:
//!
//! - malformed metadata falls back to defaults (never an error value at all)
//! - render errors are drawn in place of the slide
//! - reload errors are logged at debug level and retried on the next tick
//! - code errors become the virtual text overlay

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
///
/// # Examples
///
/// ```no_run
/// use slides::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     let _input = read_slides()?;
///     Ok(())
/// }
/// # fn read_slides() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the presentation from file or stdin.
    ///
    /// This is a **fatal error**: the presentation cannot start without content.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Terminal or TUI rendering error.
    ///
    /// Without a working terminal the presenter cannot function; the terminal
    /// is restored and the error is written to stderr.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when acquiring slide text from files or stdin.
///
/// # Recovery Patterns
///
/// - **FileNotFound / IsDirectory**: Display error and exit (user provided invalid path)
/// - **NoInput**: User must provide a file path or pipe stdin
/// - **Io**: Generic I/O failures (permissions, disk errors)
///
/// During live reload the same errors are produced by the file source but
/// swallowed by the reload monitor.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified slide file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use slides::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.md")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.md"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// The given path is a directory, not a slide file.
    #[error("Cannot read directory: {path}")]
    IsDirectory {
        /// The directory path.
        path: PathBuf,
    },

    /// No input source was provided.
    ///
    /// Occurs when no file path is given and stdin is either an interactive
    /// terminal or an empty pipe.
    ///
    /// # Examples
    ///
    /// ```
    /// use slides::model::error::InputError;
    ///
    /// let err = InputError::NoInput;
    /// assert!(err.to_string().contains("no slides provided"));
    /// ```
    #[error("No input source: no slides provided (pass a file path or pipe data to stdin)")]
    NoInput,

    /// Generic I/O error reading from the input source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to turn a slide into styled text.
///
/// Non-fatal: the view shows the message in place of the slide.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Syntax highlighting of a fenced code block failed.
    #[error("highlighting {language} block failed: {reason}")]
    Highlight {
        /// Language tag of the failing block (or "text").
        language: String,
        /// Underlying syntect error message.
        reason: String,
    },
}

/// Failure while extracting or running code blocks on a slide.
///
/// Non-fatal: the message is shown as the slide's virtual text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodeError {
    /// The slide has no fenced code blocks with a language tag.
    #[error("No code blocks found")]
    NoCodeBlocks,

    /// The block's language has no known runner.
    #[error("Error: unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The runner could not be spawned or the source file could not be written.
    #[error("Error: could not run {language} block: {reason}")]
    Spawn {
        /// Language tag of the block.
        language: String,
        /// Underlying I/O error message.
        reason: String,
    },
}
