//! The page read/write capability.

use crate::error::{Result, StorageError};
use crate::types::{PageNumber, PAGE_SIZE};

/// Trait for page-addressed storage
///
/// Implementations move exactly one page per call between a caller's buffer
/// and the backing medium at `page × PAGE_SIZE`. These are the only
/// operations that change durable page contents.
///
/// Calls on one store are not ordered against each other; callers sharing a
/// store across threads provide their own exclusion if they need it.
pub trait PageStore: Send + Sync {
    /// Fill `buf` with the page stored at `page`
    ///
    /// Fails with `ShortRead` if the medium holds less than a full page
    /// there. After any error the contents of `buf` are unspecified.
    fn read_page(&self, buf: &mut [u8], page: PageNumber) -> Result<()>;

    /// Persist `buf` as the page at `page`
    ///
    /// Writing past the end of the medium extends it; skipped pages read
    /// back as zeros.
    fn write_page(&self, buf: &[u8], page: PageNumber) -> Result<()>;
}

/// Reject buffers that are not exactly one page
pub(crate) fn check_page_len(len: usize) -> Result<()> {
    if len != PAGE_SIZE {
        return Err(StorageError::invalid_page_size(len));
    }
    Ok(())
}

/// Byte offset of `page`, or `PageOutOfRange` if the page's end overflows
pub(crate) fn page_offset(page: PageNumber) -> Result<u64> {
    page.file_offset(PAGE_SIZE)
        .filter(|offset| offset.checked_add(PAGE_SIZE as u64).is_some())
        .ok_or(StorageError::PageOutOfRange(page))
}
