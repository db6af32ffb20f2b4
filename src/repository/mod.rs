//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod storage;
mod todo_repo;

#[cfg(test)]
mod tests;

pub use traits::{KeyValueStorage, ListRepository, StorageError, StorageResult};
pub use storage::{FileStorage, MemoryStorage};
pub use todo_repo::{JsonListRepository, DEFAULT_KEY};
