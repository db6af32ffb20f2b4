//! Todo Store
//!
//! Layered architecture:
//! - domain: Todo entities and pure list transforms
//! - repository: Storage abstractions and implementations
//! - store: The authoritative list, save-after-mutate, change events
//! - commands: Handlers the presentation shell calls

use std::sync::Arc;

pub mod commands;
pub mod config;
pub mod domain;
pub mod repository;
pub mod store;

pub use config::AppConfig;
pub use domain::{DomainError, DomainResult, IdGenerator, Item, ItemId, TodoList};
pub use repository::{FileStorage, JsonListRepository, ListRepository, StorageError};
pub use store::{StoreEvent, TodoStore};

use commands::FormPolicy;

/// Name used for the log file
pub const APP_NAME: &str = "TodoStore";

/// Application state shared across commands
pub struct AppState {
    pub store: TodoStore,
    pub ids: IdGenerator,
    pub form_policy: FormPolicy,
}

impl AppState {
    /// File-backed state under `config.data_dir`
    pub async fn open(config: &AppConfig) -> Result<Self, StorageError> {
        let storage = FileStorage::open(&config.data_dir).await?;
        // Reject a bad key now rather than on the first save
        storage.path_for(&config.storage_key)?;

        let repo = JsonListRepository::new(Arc::new(storage), config.storage_key.clone());
        Ok(Self::with_repository(Arc::new(repo), config).await)
    }

    /// State over any repository
    pub async fn with_repository(repo: Arc<dyn ListRepository>, config: &AppConfig) -> Self {
        let store = TodoStore::open(repo).await;
        let ids = IdGenerator::starting_after(store.list().await.max_id().unwrap_or(0));
        log::info!("Todo store ready ({} items)", store.list().await.len());

        Self {
            store,
            ids,
            form_policy: FormPolicy {
                require_description: config.require_description,
            },
        }
    }
}

/// Route `log` / `tracing` output to the rolling log in `config.log_dir`
pub fn init_logging(config: &AppConfig) -> Result<rolling_logger::LoggerHandle, rolling_logger::LoggerError> {
    let handle = rolling_logger::init_logger(config.log_dir.clone(), APP_NAME)?;
    let _ = rolling_logger::info(&format!("Logging to {}", handle.current_path().display()));
    Ok(handle)
}
