//! Error types for the storage layer.

use thiserror::Error;
use crate::types::PageNumber;

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur in the storage layer
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O error from the underlying file system
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The medium returned fewer bytes than a full page
    #[error("short read of page {page}: got {read} bytes")]
    ShortRead { page: PageNumber, read: usize },

    /// The medium accepted fewer bytes than a full page
    #[error("short write of page {page}: expected {} bytes, wrote {written}", crate::types::PAGE_SIZE)]
    ShortWrite { page: PageNumber, written: usize },

    /// Caller supplied a buffer that is not exactly one page
    #[error("invalid page size: expected {expected} bytes, got {actual}")]
    InvalidPageSize { expected: usize, actual: usize },

    /// The page's byte offset does not fit in a file offset
    #[error("page {0} is out of addressable range")]
    PageOutOfRange(PageNumber),

    /// An index with this name already exists under the storage root
    #[error("index already exists: {0}")]
    IndexAlreadyExists(String),

    /// No index with this name exists under the storage root
    #[error("index not found: {0}")]
    IndexNotFound(String),

    /// The index name cannot be used as a file name
    #[error("invalid index name {name:?}: {reason}")]
    InvalidIndexName { name: String, reason: &'static str },

    /// Probing for an existing index failed for a reason other than absence
    #[error("failed to check existence of index {name}: {source}")]
    CheckFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Creating the backing file failed
    #[error("failed to create index file {name}: {source}")]
    CreateFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Create an invalid page size error for a buffer of `actual` bytes
    pub fn invalid_page_size(actual: usize) -> Self {
        Self::InvalidPageSize {
            expected: crate::types::PAGE_SIZE,
            actual,
        }
    }

    /// Create an invalid index name error
    pub fn invalid_name(name: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidIndexName {
            name: name.into(),
            reason,
        }
    }

    /// Whether this error reports an index name collision
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::IndexAlreadyExists(_))
    }

    /// Whether this error reports a partial page transfer
    pub fn is_short_transfer(&self) -> bool {
        matches!(self, Self::ShortRead { .. } | Self::ShortWrite { .. })
    }
}
