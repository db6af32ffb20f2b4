//! Todo Store
//!
//! Owns the authoritative in-memory list. Every mutation runs under one
//! lock: compute the new list, swap it in, save it, then notify
//! subscribers. Holding the lock across the save keeps writes in mutation
//! order and stops two quick mutations from both starting from the same
//! snapshot.
//!
//! A failed save is logged and broadcast but never undoes the mutation.

use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

use crate::domain::{list, DomainResult, Item, ItemId, TodoList};
use crate::repository::ListRepository;

/// Capacity of the change channel; slow subscribers see `Lagged`
const EVENT_CAPACITY: usize = 64;

/// Notifications for subscribers (the presentation shell)
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// The list changed; carries the new list
    ListChanged(TodoList),
    /// Saving the list after a mutation failed
    SaveFailed { error: String },
}

/// Authoritative todo list plus its durable copy
pub struct TodoStore {
    list: Mutex<TodoList>,
    repo: Arc<dyn ListRepository>,
    events: broadcast::Sender<StoreEvent>,
}

impl TodoStore {
    /// Hydrate from `repo`
    pub async fn open(repo: Arc<dyn ListRepository>) -> Self {
        let list = repo.load().await;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            list: Mutex::new(list),
            repo,
            events,
        }
    }

    /// Snapshot of the current list
    pub async fn list(&self) -> TodoList {
        self.list.lock().await.clone()
    }

    /// Listen for list changes
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Append `item`
    ///
    /// Refused adds (blank title, taken id) leave everything untouched:
    /// no save, no event.
    pub async fn add(&self, item: Item) -> DomainResult<TodoList> {
        let mut current = self.list.lock().await;
        let next = list::add(&current, item)?;
        Ok(self.commit(&mut current, next).await)
    }

    /// Remove the item with `id`; unknown ids still save and notify
    pub async fn remove(&self, id: ItemId) -> TodoList {
        let mut current = self.list.lock().await;
        let next = list::remove(&current, id);
        self.commit(&mut current, next).await
    }

    /// Flip completion of the item with `id`; unknown ids still save and notify
    pub async fn toggle(&self, id: ItemId) -> TodoList {
        let mut current = self.list.lock().await;
        let next = list::toggle(&current, id);
        self.commit(&mut current, next).await
    }

    /// Drop every item and delete the stored record
    ///
    /// Unlike the list mutations this is a storage reset: if the record
    /// can't be deleted, the error is returned and memory is left as it was.
    pub async fn clear(&self) -> DomainResult<TodoList> {
        let mut current = self.list.lock().await;
        self.repo.clear().await?;
        *current = TodoList::new();
        self.notify(StoreEvent::ListChanged(TodoList::new()));
        Ok(TodoList::new())
    }

    /// Replace memory with whatever storage holds now
    pub async fn reload(&self) -> TodoList {
        let mut current = self.list.lock().await;
        *current = self.repo.load().await;
        let snapshot = current.clone();
        self.notify(StoreEvent::ListChanged(snapshot.clone()));
        snapshot
    }

    async fn commit(&self, current: &mut TodoList, next: TodoList) -> TodoList {
        *current = next;
        let snapshot = current.clone();

        if let Err(e) = self.repo.save(&snapshot).await {
            log::error!("Error saving todos: {}", e);
            self.notify(StoreEvent::SaveFailed {
                error: e.to_string(),
            });
        }

        self.notify(StoreEvent::ListChanged(snapshot.clone()));
        snapshot
    }

    fn notify(&self, event: StoreEvent) {
        // No receivers is fine: nobody is rendering yet
        let _ = self.events.send(event);
    }
}
