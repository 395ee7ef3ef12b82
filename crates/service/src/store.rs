use std::path::PathBuf;

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::storage::{self, Record};

/// The three collections persisted side by side in the data root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Access,
    Users,
    Projects,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Access, Collection::Users, Collection::Projects];

    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Access => "access.json",
            Collection::Users => "users.json",
            Collection::Projects => "projects.json",
        }
    }
}

/// Trait abstraction for collection persistence.
/// Built once at startup and shared by every request handler.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn load(&self, collection: Collection) -> Result<Vec<Record>, StoreError>;
    async fn save(&self, collection: Collection, records: &[Record]) -> Result<(), StoreError>;
}

/// Flat-file store: one JSON array per collection under `root`.
///
/// Every call goes to disk; nothing is cached. Concurrent writers from
/// different processes are last-write-wins.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn path_of(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }
}

#[async_trait]
impl CollectionStore for FileStore {
    async fn load(&self, collection: Collection) -> Result<Vec<Record>, StoreError> {
        storage::load_collection(&self.path_of(collection)).await
    }

    async fn save(&self, collection: Collection, records: &[Record]) -> Result<(), StoreError> {
        let data = storage::to_pretty_json(records)?;
        storage::atomic_write(&self.path_of(collection), &data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn file_store_roundtrips_each_collection() -> Result<(), anyhow::Error> {
        let root = std::env::temp_dir().join(format!("file_store_{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&root).await?;
        let store = FileStore::new(&root);

        for collection in Collection::ALL {
            assert!(store.load(collection).await?.is_empty());
        }

        let user = json!({"id": 4, "name": "Ada", "tags": ["x"]});
        let records = vec![user.as_object().cloned().unwrap()];
        store.save(Collection::Users, &records).await?;

        assert_eq!(store.load(Collection::Users).await?, records);
        assert!(store.load(Collection::Projects).await?.is_empty());
        assert!(tokio::fs::metadata(root.join("users.json")).await.is_ok());

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
