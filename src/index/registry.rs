//! Open index handles shared by name.
//!
//! The registry keeps at most one [`FileStore`] per index name open for as
//! long as it stays registered. Handles are shared through `Arc`; a store is
//! released once it has been closed here and every clone is dropped.

use crate::error::Result;
use crate::index::IndexCatalog;
use crate::storage::FileStore;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of open index stores over one catalog
#[derive(Debug)]
pub struct IndexRegistry {
    catalog: IndexCatalog,
    open: RwLock<HashMap<String, Arc<FileStore>>>,
}

impl IndexRegistry {
    /// Create an empty registry over `catalog`
    pub fn new(catalog: IndexCatalog) -> Self {
        Self {
            catalog,
            open: RwLock::new(HashMap::new()),
        }
    }

    /// The catalog indexes are created in
    pub fn catalog(&self) -> &IndexCatalog {
        &self.catalog
    }

    /// Create a new index and keep its store open
    pub fn create(&self, name: &str) -> Result<Arc<FileStore>> {
        let store = Arc::new(self.catalog.create_index(name)?);
        self.open.write().insert(name.to_string(), store.clone());
        Ok(store)
    }

    /// Get the open store for `name`, opening the index if needed
    pub fn get(&self, name: &str) -> Result<Arc<FileStore>> {
        if let Some(store) = self.open.read().get(name) {
            return Ok(store.clone());
        }

        let mut open = self.open.write();
        // another caller may have opened it between the locks
        if let Some(store) = open.get(name) {
            return Ok(store.clone());
        }
        let store = Arc::new(self.catalog.open_index(name)?);
        open.insert(name.to_string(), store.clone());
        Ok(store)
    }

    /// Stop tracking `name`, returning whether it was open
    pub fn close(&self, name: &str) -> bool {
        self.open.write().remove(name).is_some()
    }

    /// Whether `name` currently has an open store
    pub fn is_open(&self, name: &str) -> bool {
        self.open.read().contains_key(name)
    }

    /// Number of open stores
    pub fn len(&self) -> usize {
        self.open.read().len()
    }

    /// Whether no store is open
    pub fn is_empty(&self) -> bool {
        self.open.read().is_empty()
    }
}
