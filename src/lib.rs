//! # Evergreen Storage
//!
//! The page-addressed storage layer of a named-index service.
//!
//! ## Architecture
//!
//! - **Page Layer** (`page`): fixed 8KB buffers moved between callers and storage
//! - **Storage Layer** (`storage`): the [`PageStore`] contract and its file and
//!   in-memory implementations
//! - **Index Layer** (`index`): exclusive index creation under a storage root
//!   and shared open handles
//! - **Server** (`server`, feature `server`): HTTP API for creating indexes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use evergreen::{IndexCatalog, Page, PageNumber, PageStore};
//!
//! # fn main() -> evergreen::Result<()> {
//! let catalog = IndexCatalog::new("/var/lib/evergreen");
//! let store = catalog.create_index("catalog")?;
//!
//! let mut page = Page::new();
//! page[0..5].copy_from_slice(b"hello");
//! store.write_page(&page, PageNumber::new(0))?;
//!
//! let mut read_back = Page::new();
//! store.read_page(&mut read_back, PageNumber::new(0))?;
//! assert_eq!(&read_back[0..5], b"hello");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod index;
pub mod page;
#[cfg(feature = "server")]
pub mod server;
pub mod storage;
pub mod types;

pub use error::{Result, StorageError};
pub use index::{validate_index_name, IndexCatalog, IndexRegistry};
pub use page::Page;
pub use storage::{FileStore, MemoryStore, PageStore};
pub use types::{PageNumber, PAGE_SIZE};

use std::path::PathBuf;
use types::{DEFAULT_DATA_DIR, DEFAULT_LISTEN_ADDR};

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage root holding one file per index
    pub data_dir: PathBuf,
    /// Address the HTTP server binds to
    pub listen_addr: String,
    /// Whether to create the storage root at startup (default: true)
    pub create_data_dir: bool,
}

impl Config {
    /// Create a configuration with the given storage root and default settings
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            create_data_dir: true,
        }
    }

    /// Set the listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = addr.into();
        self
    }

    /// Control whether the storage root is created at startup
    pub fn create_data_dir(mut self, enabled: bool) -> Self {
        self.create_data_dir = enabled;
        self
    }

    /// Catalog over the configured storage root
    pub fn catalog(&self) -> IndexCatalog {
        IndexCatalog::new(&self.data_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
