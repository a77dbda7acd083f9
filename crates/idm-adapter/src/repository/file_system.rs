//! File Role Store - Roles kept in one JSON document
//!
//! ```json
//! { "roles": { "Administrator": { "name": "Administrator", "attributes": { ... }, ... } } }
//! ```
//!
//! Every write rewrites the whole document into a temp file next to it and
//! renames it into place, so readers see either the old or the new
//! document and never a partial one.
//!
//! Writers hold an exclusive `flock` on `<path>.lock` from load to rename.
//! Two processes changing different roles are serialized instead of one
//! silently overwriting the other's change. The lock is advisory: only
//! `FileRoleStore` honors it.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use idm_domain::{RoleRecord, RoleStore, StoreError};

/// On-disk layout
#[derive(Debug, Default, Serialize, Deserialize)]
struct RoleDocument {
    #[serde(default)]
    roles: BTreeMap<String, RoleRecord>,
}

/// Role store backed by a JSON file
#[derive(Debug, Clone)]
pub struct FileRoleStore {
    path: PathBuf,
}

impl FileRoleStore {
    /// Use `path` as the role document. A missing file is an empty store;
    /// it is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Like `new`, but fails early if an existing document is unreadable
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sidecar file the writers lock
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Take the writer lock; released when the returned file is dropped
    fn lock(&self) -> Result<File, StoreError> {
        let lock_path = self.lock_path();
        let io_error = |e: std::io::Error| {
            StoreError::unavailable(format!("Failed to lock {}: {}", lock_path.display(), e))
        };

        std::fs::create_dir_all(self.dir()).map_err(io_error)?;
        let lock_file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(io_error)?;
        FileExt::lock_exclusive(&lock_file).map_err(io_error)?;
        Ok(lock_file)
    }

    /// Load, change and save the document under the writer lock. Nothing is
    /// written when `operation` fails.
    fn modify<T>(
        &self,
        operation: impl FnOnce(&mut RoleDocument) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let lock_file = self.lock()?;
        let mut document = self.load()?;
        let result = operation(&mut document)?;
        self.save(&document)?;
        drop(lock_file);
        Ok(result)
    }

    fn load(&self) -> Result<RoleDocument, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(RoleDocument::default()),
            Err(e) => {
                return Err(StoreError::unavailable(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if content.trim().is_empty() {
            return Ok(RoleDocument::default());
        }

        let document: RoleDocument = serde_json::from_str(&content).map_err(|e| {
            StoreError::unavailable(format!("Corrupt role document {}: {}", self.path.display(), e))
        })?;

        if let Some((key, record)) = document.roles.iter().find(|(key, r)| **key != r.name) {
            return Err(StoreError::unavailable(format!(
                "Corrupt role document {}: entry '{}' holds role '{}'",
                self.path.display(),
                key,
                record.name
            )));
        }

        debug!(path = %self.path.display(), roles = document.roles.len(), "Loaded role document");
        Ok(document)
    }

    fn save(&self, document: &RoleDocument) -> Result<(), StoreError> {
        let dir = self.dir();
        let io_error = |e: std::io::Error| {
            StoreError::unavailable(format!("Failed to write {}: {}", self.path.display(), e))
        };

        std::fs::create_dir_all(dir).map_err(io_error)?;

        let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
        serde_json::to_writer_pretty(&mut file, document).map_err(|e| {
            StoreError::unavailable(format!("Failed to encode role document: {}", e))
        })?;
        file.write_all(b"\n").map_err(io_error)?;
        file.as_file().sync_all().map_err(io_error)?;
        file.persist(&self.path).map_err(|e| io_error(e.error))?;

        debug!(path = %self.path.display(), roles = document.roles.len(), "Saved role document");
        Ok(())
    }
}

impl RoleStore for FileRoleStore {
    fn find(&self, name: &str) -> Result<Option<RoleRecord>, StoreError> {
        Ok(self.load()?.roles.remove(name))
    }

    fn insert(&mut self, record: RoleRecord) -> Result<(), StoreError> {
        self.modify(|document| {
            if document.roles.contains_key(&record.name) {
                return Err(StoreError::duplicate(record.name));
            }
            document.roles.insert(record.name.clone(), record);
            Ok(())
        })
    }

    fn replace(&mut self, record: RoleRecord) -> Result<(), StoreError> {
        self.modify(|document| match document.roles.get_mut(&record.name) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(StoreError::not_found(record.name)),
        })
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        self.modify(|document| {
            document
                .roles
                .remove(name)
                .map(|_| ())
                .ok_or_else(|| StoreError::not_found(name))
        })
    }

    fn list(&self) -> Result<Vec<RoleRecord>, StoreError> {
        Ok(self.load()?.roles.into_values().collect())
    }
}
