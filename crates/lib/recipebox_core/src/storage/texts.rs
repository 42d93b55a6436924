//! Text blob store: one arbitrary JSON value, replaced on every save.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::sync::Mutex;

use super::{StorageError, read_json, write_json};

/// Default file name for the text blob.
pub const DEFAULT_TEXTS_FILE: &str = "data.json";

#[derive(Debug)]
pub struct TextStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TextStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last saved value, or an empty array if nothing was ever saved.
    pub async fn load(&self) -> Result<Value, StorageError> {
        Ok(read_json(&self.path)
            .await?
            .unwrap_or_else(|| Value::Array(Vec::new())))
    }

    /// Replace the stored value verbatim.
    pub async fn save(&self, value: &Value) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        write_json(&self.path, value).await
    }
}
