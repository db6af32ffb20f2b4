//! Repository Integration Tests
//!
//! Tests for JsonListRepository over file and in-memory storage.

#[cfg(test)]
mod tests {
    use crate::domain::{list, DomainError, Item, TodoList};
    use crate::repository::{
        FileStorage, JsonListRepository, KeyValueStorage, ListRepository, MemoryStorage,
        StorageError, DEFAULT_KEY,
    };
    use std::sync::Arc;
    use tempfile::TempDir;

    fn memory_repo() -> JsonListRepository<MemoryStorage> {
        JsonListRepository::new(Arc::new(MemoryStorage::new()), DEFAULT_KEY)
    }

    async fn file_repo(dir: &TempDir) -> JsonListRepository<FileStorage> {
        let storage = FileStorage::open(dir.path().join("data"))
            .await
            .expect("Failed to open storage");
        JsonListRepository::new(Arc::new(storage), DEFAULT_KEY)
    }

    #[tokio::test]
    async fn test_load_missing_is_empty() {
        let repo = memory_repo();
        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_writes_json_array() {
        let repo = memory_repo();
        let list = list::add(&TodoList::new(), Item::new(1, "Buy Milk", "2%")).unwrap();

        repo.save(&list).await.expect("Save failed");

        let stored = repo.storage().get_item("todos").await.unwrap().unwrap();
        assert_eq!(
            stored,
            r#"[{"id":1,"text":"Buy Milk","description":"2%","completed":false}]"#
        );
    }

    #[tokio::test]
    async fn test_round_trip() {
        let repo = memory_repo();
        let list = list::add(&TodoList::new(), Item::new(1, "Buy Milk", "2%")).unwrap();
        let list = list::add(&list, Item::new(2, "Buy Bread", "")).unwrap();
        let list = list::toggle(&list, 2);

        repo.save(&list).await.unwrap();
        assert_eq!(repo.load().await, list);
    }

    #[tokio::test]
    async fn test_malformed_is_empty() {
        let repo = memory_repo();
        repo.storage().set_item("todos", "{not json").await.unwrap();
        assert!(repo.load().await.is_empty());

        repo.storage().set_item("todos", r#"{"id":1}"#).await.unwrap();
        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_drops_repeated_ids() {
        let repo = memory_repo();
        repo.storage()
            .set_item(
                "todos",
                r#"[{"id":1,"text":"a","description":"","completed":false},
                    {"id":1,"text":"b","description":"","completed":true}]"#,
            )
            .await
            .unwrap();

        let loaded = repo.load().await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.items()[0].text, "a");
    }

    #[tokio::test]
    async fn test_load_old_records_without_description() {
        let repo = memory_repo();
        repo.storage()
            .set_item("todos", r#"[{"id":1,"text":"Buy Milk","completed":false}]"#)
            .await
            .unwrap();

        let loaded = repo.load().await;
        assert_eq!(loaded.items(), &[Item::new(1, "Buy Milk", "")]);
    }

    #[tokio::test]
    async fn test_save_failure_reports_error() {
        let repo = memory_repo();
        repo.storage().set_read_only(true);

        let err = repo.save(&TodoList::new()).await.unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_clear_removes_record() {
        let repo = memory_repo();
        let list = list::add(&TodoList::new(), Item::new(1, "Buy Milk", "")).unwrap();
        repo.save(&list).await.unwrap();

        repo.clear().await.expect("Clear failed");
        repo.clear().await.expect("Clearing twice failed");

        assert_eq!(repo.storage().get_item("todos").await.unwrap(), None);
        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_failure_converts_to_domain_error() {
        let repo = memory_repo();
        repo.storage().set_read_only(true);

        let err: DomainError = repo.clear().await.unwrap_err().into();
        assert_eq!(
            err,
            DomainError::Internal("storage unavailable: storage is read-only".to_string())
        );
    }

    #[tokio::test]
    async fn test_uses_own_key() {
        let storage = Arc::new(MemoryStorage::new());
        let a = JsonListRepository::new(storage.clone(), "a");
        let b = JsonListRepository::new(storage.clone(), "b");

        let list = list::add(&TodoList::new(), Item::new(1, "only a", "")).unwrap();
        a.save(&list).await.unwrap();

        assert_eq!(a.key(), "a");
        assert_eq!(a.load().await, list);
        assert!(b.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let repo = file_repo(&dir).await;
        let list = list::add(&TodoList::new(), Item::new(42, "Buy Eggs", "a dozen")).unwrap();

        repo.save(&list).await.expect("Save failed");

        assert!(dir.path().join("data").join("todos.json").exists());
        assert!(!dir.path().join("data").join("todos.json.tmp").exists());

        let reopened = file_repo(&dir).await;
        assert_eq!(reopened.load().await, list);
    }

    #[tokio::test]
    async fn test_file_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let repo = file_repo(&dir).await;

        let first = list::add(&TodoList::new(), Item::new(1, "one", "")).unwrap();
        let second = list::remove(&first, 1);
        repo.save(&first).await.unwrap();
        repo.save(&second).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("data").join("todos.json")).unwrap();
        assert_eq!(raw, "[]");
    }

    #[tokio::test]
    async fn test_file_storage_remove_and_keys() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path()).await.unwrap();

        storage.set_item("todos", "[]").await.unwrap();
        storage.remove_item("todos").await.unwrap();
        storage.remove_item("todos").await.unwrap();
        assert_eq!(storage.get_item("todos").await.unwrap(), None);

        assert!(storage.path_for("../escape").is_err());
        assert!(storage.path_for("").is_err());
        assert!(storage.get_item("a/b").await.is_err());
    }
}
