//! Domain model types.
//!
//! Plain data shared by the parser, the state machine and the view.

pub mod error;
pub mod key_action;
pub mod metadata;

pub use error::{AppError, CodeError, InputError, RenderError};
pub use key_action::KeyAction;
pub use metadata::{render_paging, Metadata};
