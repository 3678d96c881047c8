//! Presentation state machine (pure).
//!
//! All state transitions are testable without a terminal. The only side
//! effects reachable from here are the reload monitor's file reads and the
//! code executor, both behind traits.

pub mod navigation;
pub mod presentation;
pub mod reload;
pub mod search;

// Re-export for convenience
pub use navigation::{navigate, NavKey, NavigationState};
pub use presentation::{Command, Message, Presentation};
pub use reload::{ReloadMonitor, DEFAULT_RELOAD_INTERVAL};
pub use search::{SearchQuery, SearchState};
