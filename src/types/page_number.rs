//! Page number type.

use std::fmt;

/// Logical position of a page within an index's backing file.
///
/// Page numbers are 0-indexed and carry no bounds: a number past the end of
/// the file is a valid request whose outcome is decided by the medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PageNumber(pub u64);

impl PageNumber {
    /// Create a new page number
    pub const fn new(n: u64) -> Self {
        Self(n)
    }

    /// Get the raw page number
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Byte offset of this page in a file of `page_size` pages.
    ///
    /// Returns `None` when the offset does not fit in a `u64`.
    pub const fn file_offset(self, page_size: usize) -> Option<u64> {
        self.0.checked_mul(page_size as u64)
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PageNumber {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl From<PageNumber> for u64 {
    fn from(n: PageNumber) -> Self {
        n.0
    }
}
