//! Page layer: the fixed-size unit of transfer between callers and storage.
//!
//! A [`Page`] is always exactly [`PAGE_SIZE`] bytes. Callers allocate one
//! before a read or write and may reuse it across calls; stores only borrow it.

use crate::error::{Result, StorageError};
use crate::types::PAGE_SIZE;
use std::fmt;

/// A raw page buffer
#[derive(Clone, PartialEq, Eq)]
pub struct Page {
    data: [u8; PAGE_SIZE],
}

impl Page {
    /// Create a new zeroed page
    pub fn new() -> Self {
        Self {
            data: [0u8; PAGE_SIZE],
        }
    }

    /// Create a page from exactly `PAGE_SIZE` bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let data: [u8; PAGE_SIZE] = bytes
            .try_into()
            .map_err(|_| StorageError::invalid_page_size(bytes.len()))?;
        Ok(Self { data })
    }

    /// Get a reference to the whole buffer
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get a mutable reference to the whole buffer
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Reset every byte to zero
    pub fn clear(&mut self) {
        self.data.fill(0);
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page").field("len", &self.data.len()).finish()
    }
}

impl TryFrom<&[u8]> for Page {
    type Error = StorageError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl std::ops::Deref for Page {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl std::ops::DerefMut for Page {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl AsRef<[u8]> for Page {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<[u8]> for Page {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
