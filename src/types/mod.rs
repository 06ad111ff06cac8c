//! Common types and constants used throughout the storage layer.

mod page_number;

pub use page_number::PageNumber;

/// Page size in bytes (8KB), fixed at build time for every index
pub const PAGE_SIZE: usize = 8 * 1024;

/// Storage root used when none is configured
pub const DEFAULT_DATA_DIR: &str = "/var/lib/evergreen";

/// Address the server listens on when none is configured
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5225";

/// Longest index name accepted, matching common file-name limits
pub const MAX_INDEX_NAME_LEN: usize = 255;
