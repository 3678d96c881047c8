//! slides
//!
//! Terminal presenter for markdown slide decks.
//!
//! The library follows a Pure Core / Impure Shell split: `parser`, `state`
//! and `model` are deterministic and tested without a terminal; `source`,
//! `code` and `view` do the I/O.

pub mod code;
pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod view;
