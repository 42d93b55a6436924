//! Flat-file JSON persistence.
//!
//! Each store owns one JSON document that is loaded whole and rewritten
//! whole. Writes go to a sibling `*.tmp` file which is then renamed over the
//! target, so readers never observe a half-written document.

pub mod recipes;
pub mod texts;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Which half of a load-modify-save sequence failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Read,
    Write,
}

impl fmt::Display for StorageOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StorageOp::Read => "reading",
            StorageOp::Write => "writing",
        })
    }
}

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error {op} {}: {source}", path.display())]
    Io {
        op: StorageOp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error {op} {}: {source}", path.display())]
    Json {
        op: StorageOp,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    fn io(op: StorageOp, path: &Path, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(op: StorageOp, path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether the document could not be read or could not be written.
    pub fn op(&self) -> StorageOp {
        match self {
            StorageError::Io { op, .. } | StorageError::Json { op, .. } => *op,
        }
    }
}

/// Read and decode a JSON document. Returns `None` when the file is absent.
async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StorageError::io(StorageOp::Read, path, e)),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| StorageError::json(StorageOp::Read, path, e))
}

/// Encode `value` as pretty JSON and replace the file at `path`.
///
/// Non-ASCII text is written as UTF-8, never `\u` escaped.
async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| StorageError::json(StorageOp::Write, path, e))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::io(StorageOp::Write, parent, e))?;
    }

    let tmp = temp_path(path);
    tokio::fs::write(&tmp, &bytes)
        .await
        .map_err(|e| StorageError::io(StorageOp::Write, &tmp, e))?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(StorageError::io(StorageOp::Write, path, e));
    }

    debug!(path = %path.display(), bytes = bytes.len(), "wrote JSON document");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
