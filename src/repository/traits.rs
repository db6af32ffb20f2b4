//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use files, memory, etc.

use async_trait::async_trait;

use crate::domain::{DomainError, TodoList};

/// Common result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-level errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<StorageError> for DomainError {
    fn from(e: StorageError) -> Self {
        DomainError::Internal(e.to_string())
    }
}

/// String key-value store holding serialized records
///
/// One key maps to one whole value; `set_item` replaces it.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value under `key`, `None` if absent
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrite the value under `key`
    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete the value under `key`; absent keys are fine
    async fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// Durable copy of the todo list
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Read the stored list
    ///
    /// Never fails: missing or unreadable data yields an empty list.
    async fn load(&self) -> TodoList;

    /// Replace the stored list with `list`
    async fn save(&self, list: &TodoList) -> StorageResult<()>;

    /// Delete the stored list entirely
    async fn clear(&self) -> StorageResult<()>;
}
