use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, warn};
use uuid::Uuid;

use super::Record;
use crate::errors::StoreError;

/// Read a JSON array of objects from `path`.
///
/// A missing file is an empty collection. A readable file whose top-level
/// value is not an array is also treated as empty. Anything else that goes
/// wrong (I/O, bad JSON, non-object entries) is a `StoreError::Read`.
pub async fn load_collection(path: &Path) -> Result<Vec<Record>, StoreError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "collection file missing; using empty collection");
            return Ok(Vec::new());
        }
        Err(e) => return Err(StoreError::read(path, e)),
    };

    let value: Value = serde_json::from_slice(&bytes).map_err(|e| StoreError::read(path, e))?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            warn!(path = %path.display(), kind = json_kind(&other), "collection file is not an array; using empty collection");
            return Ok(Vec::new());
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::read(
                path,
                format!("entry {idx} is {}, expected an object", json_kind(&other)),
            )),
        })
        .collect()
}

/// Serialize records with two-space indentation.
pub fn to_pretty_json(records: &[Record]) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec_pretty(records)?)
}

/// Replace `path` with `data` so readers see either the old or the new file, never a mix.
pub async fn atomic_write(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    StagedWrite::stage(path, data).await?.commit().await
}

/// A fully written temp file next to its target, waiting to be renamed into place.
///
/// Dropping it without `commit` leaves the target untouched; the orphaned
/// temp file is the only trace.
#[derive(Debug)]
pub struct StagedWrite {
    tmp: PathBuf,
    target: PathBuf,
}

impl StagedWrite {
    pub async fn stage(target: &Path, data: &[u8]) -> Result<Self, StoreError> {
        let name = target.file_name().ok_or_else(|| {
            StoreError::write(
                target,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "target has no file name"),
            )
        })?;
        let dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let tmp = dir.join(format!(".tmp-{}-{}", name.to_string_lossy(), Uuid::new_v4()));

        if let Err(e) = write_synced(&tmp, data).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::write(target, e));
        }
        debug!(tmp = %tmp.display(), bytes = data.len(), "staged collection write");
        Ok(Self { tmp, target: target.to_path_buf() })
    }

    pub fn temp_path(&self) -> &Path {
        &self.tmp
    }

    pub async fn commit(self) -> Result<(), StoreError> {
        if let Err(e) = fs::rename(&self.tmp, &self.target).await {
            let _ = fs::remove_file(&self.tmp).await;
            return Err(StoreError::write(&self.target, e));
        }
        debug!(target = %self.target.display(), "committed collection write");
        Ok(())
    }

    /// Discard the staged data.
    pub async fn abort(self) {
        let _ = fs::remove_file(&self.tmp).await;
    }
}

async fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    Ok(())
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("json_array_store_{}", Uuid::new_v4()))
    }

    async fn leftover_temp_files(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        let mut rd = fs::read_dir(dir).await.unwrap();
        while let Some(entry) = rd.next_entry().await.unwrap() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(".tmp-") {
                names.push(name);
            }
        }
        names
    }

    fn record(v: Value) -> Record {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn missing_file_is_empty_collection() -> Result<(), anyhow::Error> {
        let dir = temp_dir();
        let loaded = load_collection(&dir.join("users.json")).await?;
        assert!(loaded.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn non_array_document_is_empty_collection() -> Result<(), anyhow::Error> {
        let dir = temp_dir();
        fs::create_dir_all(&dir).await?;
        let path = dir.join("projects.json");
        fs::write(&path, br#"{"id": 1}"#).await?;

        assert!(load_collection(&path).await?.is_empty());
        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn bad_json_and_bad_entries_are_read_errors() -> Result<(), anyhow::Error> {
        let dir = temp_dir();
        fs::create_dir_all(&dir).await?;

        let garbled = dir.join("users.json");
        fs::write(&garbled, b"[{\"id\": 1},").await?;
        let err = load_collection(&garbled).await.unwrap_err();
        assert!(matches!(err, StoreError::Read { ref file, .. } if file == "users.json"));

        let scalars = dir.join("access.json");
        fs::write(&scalars, b"[{\"id\": 1}, 7]").await?;
        let err = load_collection(&scalars).await.unwrap_err();
        assert!(err.to_string().contains("entry 1"));

        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn load_preserves_key_order() -> Result<(), anyhow::Error> {
        let dir = temp_dir();
        fs::create_dir_all(&dir).await?;
        let path = dir.join("users.json");
        fs::write(&path, br#"[{"zeta": 1, "alpha": 2, "id": 3}]"#).await?;

        let loaded = load_collection(&path).await?;
        let keys: Vec<&str> = loaded[0].keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "id"]);

        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn atomic_write_replaces_and_cleans_up() -> Result<(), anyhow::Error> {
        let dir = temp_dir();
        fs::create_dir_all(&dir).await?;
        let path = dir.join("access.json");
        fs::write(&path, b"[]").await?;

        let records = vec![record(json!({"user_id": 1, "project_id": 2}))];
        atomic_write(&path, &to_pretty_json(&records)?).await?;

        let text = fs::read_to_string(&path).await?;
        assert_eq!(text, "[\n  {\n    \"user_id\": 1,\n    \"project_id\": 2\n  }\n]");
        assert!(leftover_temp_files(&dir).await.is_empty());

        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn crash_before_rename_leaves_original_untouched() -> Result<(), anyhow::Error> {
        let dir = temp_dir();
        fs::create_dir_all(&dir).await?;
        let path = dir.join("access.json");
        let original = b"[\n  {\n    \"user_id\": 9\n  }\n]".to_vec();
        fs::write(&path, &original).await?;

        let staged = StagedWrite::stage(&path, b"[]").await?;
        assert_eq!(fs::read(staged.temp_path()).await?, b"[]");
        // process dies here: the rename never happens
        drop(staged);

        assert_eq!(fs::read(&path).await?, original);
        assert_eq!(load_collection(&path).await?.len(), 1);

        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn aborted_stage_removes_temp_file() -> Result<(), anyhow::Error> {
        let dir = temp_dir();
        fs::create_dir_all(&dir).await?;
        let path = dir.join("access.json");

        let staged = StagedWrite::stage(&path, b"[]").await?;
        staged.abort().await;

        assert!(leftover_temp_files(&dir).await.is_empty());
        assert!(fs::metadata(&path).await.is_err());

        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn write_into_missing_directory_fails() {
        let path = temp_dir().join("nested").join("access.json");
        let err = atomic_write(&path, b"[]").await.unwrap_err();
        assert!(matches!(err, StoreError::Write { ref file, .. } if file == "access.json"));
        assert!(fs::metadata(&path).await.is_err());
    }

    #[tokio::test]
    async fn failed_rename_keeps_target_and_drops_temp() -> Result<(), anyhow::Error> {
        let dir = temp_dir();
        // a non-empty directory cannot be replaced by a rename
        let path = dir.join("access.json");
        fs::create_dir_all(&path).await?;
        fs::write(path.join("keep"), b"x").await?;

        let err = atomic_write(&path, b"[]").await.unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert_eq!(fs::read(path.join("keep")).await?, b"x");
        assert!(leftover_temp_files(&dir).await.is_empty());

        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
