//! Application model types.

pub mod error;
pub mod key_action;
pub mod line_store;

pub use error::{AppError, InputError};
pub use key_action::KeyAction;
pub use line_store::{LineStore, SharedLines};
