use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::info;

use super::domain::validate_batch;
use super::merge::{merge, order, replace, WriteMode};
use crate::errors::StoreError;
use crate::store::{Collection, CollectionStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteOutcome {
    pub count: usize,
}

/// Write pipeline for the access collection:
/// validate, load (merge only), merge or replace, sort, persist.
///
/// Writes through one `AccessService` are serialized so a read-merge-write
/// cycle never interleaves with another. Other processes writing the same
/// file still race; the last rename wins.
pub struct AccessService {
    store: Arc<dyn CollectionStore>,
    write_lock: Mutex<()>,
}

impl AccessService {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store, write_lock: Mutex::new(()) }
    }

    /// Current access collection as stored on disk.
    pub async fn list(&self) -> Result<Vec<crate::storage::Record>, StoreError> {
        self.store.load(Collection::Access).await
    }

    pub async fn apply(&self, body: Value, mode: WriteMode) -> Result<WriteOutcome, StoreError> {
        let incoming = validate_batch(body)?;
        let submitted = incoming.len();

        let _guard = self.write_lock.lock().await;
        let mut result = match mode {
            WriteMode::Replace => replace(incoming),
            WriteMode::Merge => {
                let existing = self.store.load(Collection::Access).await?;
                merge(existing, incoming)
            }
        };
        order(&mut result);
        self.store.save(Collection::Access, &result).await?;

        info!(?mode, submitted, count = result.len(), "access collection written");
        Ok(WriteOutcome { count: result.len() })
    }
}
