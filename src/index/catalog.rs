//! Index creation and lookup under a storage root.

use crate::error::{Result, StorageError};
use crate::index::validate_index_name;
use crate::storage::FileStore;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The set of indexes kept as files directly under one directory
#[derive(Debug, Clone)]
pub struct IndexCatalog {
    root: PathBuf,
}

impl IndexCatalog {
    /// Create a catalog over `root`
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// The storage root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the storage root directory if it does not exist yet
    pub fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Path of the backing file for `name`
    pub fn index_path(&self, name: &str) -> Result<PathBuf> {
        validate_index_name(name)?;
        Ok(self.root.join(name))
    }

    /// Create a new index and return an open store for it.
    ///
    /// Exactly one of concurrent callers creating the same name succeeds;
    /// the rest get `IndexAlreadyExists`. The metadata probe only answers
    /// the common case early. The exclusive create decides the race.
    pub fn create_index(&self, name: &str) -> Result<FileStore> {
        let path = self.index_path(name)?;

        match fs::symlink_metadata(&path) {
            Ok(_) => {
                log::warn!("index {} already exists", name);
                return Err(StorageError::IndexAlreadyExists(name.to_string()));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(StorageError::CheckFailed {
                    name: name.to_string(),
                    source,
                })
            }
        }

        let store = FileStore::create(&path).map_err(|source| {
            if source.kind() == ErrorKind::AlreadyExists {
                log::warn!("index {} created concurrently", name);
                StorageError::IndexAlreadyExists(name.to_string())
            } else {
                StorageError::CreateFailed {
                    name: name.to_string(),
                    source,
                }
            }
        })?;

        log::debug!("created index {} at {}", name, path.display());
        Ok(store)
    }

    /// Open the store of an existing index
    pub fn open_index(&self, name: &str) -> Result<FileStore> {
        let path = self.index_path(name)?;

        let store = FileStore::open(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::IndexNotFound(name.to_string())
            } else {
                StorageError::Io(e)
            }
        })?;

        log::debug!("opened index {}", name);
        Ok(store)
    }

    /// Whether an index named `name` exists
    pub fn index_exists(&self, name: &str) -> Result<bool> {
        let path = self.index_path(name)?;
        match fs::symlink_metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StorageError::CheckFailed {
                name: name.to_string(),
                source,
            }),
        }
    }

    /// Names of all indexes under the root, sorted
    pub fn list_indexes(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}
