// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! A JSON array file used as a record store.
//!
//! Every mutation reads the whole file, changes the records in memory and
//! writes the whole file back. Mutations are serialized by an async mutex
//! and the new contents are written to a temporary file that is renamed
//! over the old one, so readers never observe a half-written file.

use super::StoreError;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Result of a mutation closure: whether the records must be written back.
pub enum Mutation<R> {
    Changed(R),
    Unchanged(R),
}

/// Typed handle to one JSON array file.
pub struct JsonFile<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open the file, creating it as an empty array if missing.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if !tokio::fs::try_exists(&path).await.map_err(|e| io_error(&path, e))? {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| io_error(parent, e))?;
            }
            tokio::fs::write(&path, b"[]")
                .await
                .map_err(|e| io_error(&path, e))?;
            tracing::info!(path = %path.display(), "Created empty record file");
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
            _records: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record. A missing or blank file is an empty store.
    pub async fn load(&self) -> Result<Vec<T>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Run one read-modify-write cycle under the store lock.
    pub async fn mutate<R, F>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<Mutation<R>, StoreError>,
    {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        match f(&mut records)? {
            Mutation::Changed(result) => {
                self.persist(&records).await?;
                Ok(result)
            }
            Mutation::Unchanged(result) => Ok(result),
        }
    }

    /// Replace the file contents atomically.
    async fn persist(&self, records: &[T]) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(records)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        tokio::fs::write(&tmp_path, &data)
            .await
            .map_err(|e| io_error(&tmp_path, e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| io_error(&self.path, e))?;

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            bytes = data.len(),
            "Record file written"
        );
        Ok(())
    }
}

fn io_error(path: &Path, err: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// `records[skip..skip + limit]`, clamped to the list bounds.
pub fn page<T: Clone>(records: &[T], skip: usize, limit: usize) -> Vec<T> {
    records
        .iter()
        .skip(skip)
        .take(limit)
        .cloned()
        .collect()
}
