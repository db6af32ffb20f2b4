//! Domain Layer
//!
//! Contains the todo entities and the pure list transforms.
//! Nothing here touches storage.

mod error;
mod item;
mod item_id;
pub mod list;

pub use error::{DomainError, DomainResult};
pub use item::Item;
pub use item_id::{IdGenerator, ItemId};
pub use list::TodoList;
