use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Store file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Value for key {key:?} could not be converted: {source}")]
    Value {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StorageError::Io { path: path.to_path_buf(), source }
    }
}

/// A flat JSON object on disk. Every mutation rewrites the whole file.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl LocalStore {
    /// Loads the store; a missing file is an empty store.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| {
                warn!(error = %source, "Store file is not a JSON object");
                StorageError::Corrupt { path: path.clone(), source }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No store file yet, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(StorageError::io(&path, e)),
        };
        debug!(keys = entries.len(), "Store opened");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|source| StorageError::Value { key: key.to_string(), source }),
        }
    }

    pub async fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let value =
            serde_json::to_value(value).map_err(|source| StorageError::Value { key: key.to_string(), source })?;
        let previous = self.entries.insert(key.to_string(), value);
        if let Err(e) = self.flush().await {
            // Keep memory and disk in step.
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    /// Returns false if the key was not present.
    pub async fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(false);
        };
        if let Err(e) = self.flush().await {
            self.entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(true)
    }

    /// Writes to a sibling temp file, then renames it over the store.
    async fn flush(&self) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(&self.entries)
            .map_err(|source| StorageError::Corrupt { path: self.path.clone(), source })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(parent, e))?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, &bytes).await.map_err(|e| StorageError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StorageError::io(&self.path, e))?;
        Ok(())
    }
}
