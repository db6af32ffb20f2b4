//! Commands Layer
//!
//! Handlers that bridge the presentation shell to the store.

mod form;
mod item_cmd;

pub use form::{FormPolicy, FormRejection, TodoForm, SUCCESS_MESSAGE};
pub use item_cmd::*;
