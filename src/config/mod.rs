//! Configuration module.
//!
//! Settings come from (lowest to highest precedence) built-in defaults, the
//! TOML config file, environment variables and CLI flags.

pub mod keybindings;
pub mod loader;

pub use keybindings::{parse_key, KeyBindings};
pub use loader::{resolve, ConfigError, ConfigFile, ResolvedConfig};
