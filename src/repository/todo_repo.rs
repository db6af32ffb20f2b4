//! Todo List Repository
//!
//! Keeps the whole list as one JSON array under a single storage key.
//! Every save rewrites the full array.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Item, TodoList};
use super::traits::{KeyValueStorage, ListRepository, StorageResult};

/// Default storage key for the list
pub const DEFAULT_KEY: &str = "todos";

/// JSON-array implementation of [`ListRepository`]
pub struct JsonListRepository<S: KeyValueStorage> {
    storage: Arc<S>,
    key: String,
}

impl<S: KeyValueStorage> JsonListRepository<S> {
    pub fn new(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

#[async_trait]
impl<S: KeyValueStorage> ListRepository for JsonListRepository<S> {
    async fn load(&self) -> TodoList {
        let raw = match self.storage.get_item(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::info!("No stored todos under {:?}, starting empty", self.key);
                return TodoList::new();
            }
            Err(e) => {
                log::warn!("Error loading todos: {}", e);
                return TodoList::new();
            }
        };

        let records: Vec<Item> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Stored todos under {:?} are malformed, ignoring: {}", self.key, e);
                return TodoList::new();
            }
        };

        let (list, dropped) = TodoList::from_records(records);
        if dropped > 0 {
            log::warn!("Dropped {} stored todos with repeated ids", dropped);
        }
        log::info!("Loaded {} todos", list.len());
        list
    }

    async fn save(&self, list: &TodoList) -> StorageResult<()> {
        let json = serde_json::to_string(list)?;
        self.storage.set_item(&self.key, &json).await?;
        log::debug!("Saved {} todos", list.len());
        Ok(())
    }

    async fn clear(&self) -> StorageResult<()> {
        self.storage.remove_item(&self.key).await?;
        log::info!("Cleared stored todos under {:?}", self.key);
        Ok(())
    }
}
