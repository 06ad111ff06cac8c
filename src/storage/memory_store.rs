//! In-memory page store.
//!
//! Mirrors [`FileStore`](super::FileStore) semantics over a growable byte
//! vector: writes past the end zero-fill the gap, reads past the end are
//! short reads. Nothing survives the process.

use crate::error::{Result, StorageError};
use crate::storage::page_store::{check_page_len, page_offset};
use crate::storage::PageStore;
use crate::types::{PageNumber, PAGE_SIZE};
use parking_lot::RwLock;

/// Volatile page store backed by a byte vector
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Current size in bytes
    pub fn len(&self) -> u64 {
        self.data.read().len() as u64
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Number of whole pages held
    pub fn page_count(&self) -> u64 {
        self.len() / PAGE_SIZE as u64
    }
}

impl PageStore for MemoryStore {
    fn read_page(&self, buf: &mut [u8], page: PageNumber) -> Result<()> {
        check_page_len(buf.len())?;
        let offset = page_offset(page)?;

        let data = self.data.read();
        let start = usize::try_from(offset)
            .unwrap_or(usize::MAX)
            .min(data.len());
        let available = &data[start..];
        let read = available.len().min(PAGE_SIZE);
        buf[..read].copy_from_slice(&available[..read]);

        if read != PAGE_SIZE {
            return Err(StorageError::ShortRead { page, read });
        }
        Ok(())
    }

    fn write_page(&self, buf: &[u8], page: PageNumber) -> Result<()> {
        check_page_len(buf.len())?;
        let offset = page_offset(page)?;
        let start = usize::try_from(offset).map_err(|_| StorageError::PageOutOfRange(page))?;
        let end = start
            .checked_add(PAGE_SIZE)
            .ok_or(StorageError::PageOutOfRange(page))?;

        let mut data = self.data.write();
        if data.len() < end {
            data.resize(end, 0);
        }
        data[start..end].copy_from_slice(buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;

    #[test]
    fn test_memory_store_round_trip() -> Result<()> {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        let mut page = Page::new();
        page[0..5].copy_from_slice(b"hello");
        store.write_page(&page, PageNumber::new(1))?;
        assert_eq!(store.page_count(), 2);

        let mut read_back = Page::new();
        store.read_page(&mut read_back, PageNumber::new(1))?;
        assert_eq!(&read_back[0..5], b"hello");

        store.read_page(&mut read_back, PageNumber::new(0))?;
        assert!(read_back.iter().all(|&b| b == 0));

        Ok(())
    }

    #[test]
    fn test_memory_store_short_read() {
        let store = MemoryStore::new();
        let mut page = Page::new();
        let err = store.read_page(&mut page, PageNumber::new(0)).unwrap_err();
        assert!(matches!(err, StorageError::ShortRead { read: 0, .. }));
    }

    #[test]
    fn test_memory_store_rejects_wrong_size() {
        let store = MemoryStore::new();
        let err = store.write_page(&[0u8; 10], PageNumber::new(0)).unwrap_err();
        assert!(matches!(err, StorageError::InvalidPageSize { actual: 10, .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_usable_as_trait_object() -> Result<()> {
        let store: Box<dyn PageStore> = Box::new(MemoryStore::new());
        let mut page = Page::new();
        page[7] = 9;
        store.write_page(&page, PageNumber::new(0))?;

        let mut read_back = Page::new();
        store.read_page(&mut read_back, PageNumber::new(0))?;
        assert_eq!(read_back[7], 9);
        Ok(())
    }
}
