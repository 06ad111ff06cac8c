//! Single-file page store.
//!
//! Page N lives at byte offset `N × PAGE_SIZE` in one backing file per index:
//!
//! ```text
//! ┌─────────┬─────────┬─────────┬─────────┐
//! │ Page 0  │ Page 1  │  ...    │ Page N  │
//! │ (8KB)   │ (8KB)   │         │ (8KB)   │
//! └─────────┴─────────┴─────────┴─────────┘
//! Offset: 0    8192      ...    N×8192
//! ```
//!
//! Every call is a direct positioned read or write against the file. There
//! is no cache, and nothing is flushed to stable storage unless the caller
//! asks for it with [`FileStore::sync`]; a page written without a sync may
//! be lost on power failure even though `write_page` returned `Ok`.

use crate::error::{Result, StorageError};
use crate::storage::page_store::{check_page_len, page_offset};
use crate::storage::PageStore;
use crate::types::{PageNumber, PAGE_SIZE};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// File-based page store
#[derive(Debug)]
pub struct FileStore {
    /// The backing file
    file: File,
    /// Where the backing file lives
    path: PathBuf,
}

impl FileStore {
    /// Create a new, empty backing file.
    ///
    /// Creation is exclusive: if anything already exists at `path` this
    /// fails with an `io::ErrorKind::AlreadyExists` error.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path)?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Open an existing backing file for reading and writing
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current size of the backing file in bytes
    pub fn len(&self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    /// Whether the backing file is empty
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Number of whole pages in the backing file
    pub fn page_count(&self) -> Result<u64> {
        Ok(self.len()? / PAGE_SIZE as u64)
    }

    /// Flush file contents and metadata to stable storage
    pub fn sync(&self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }

    /// Release the handle
    pub fn close(self) {
        log::debug!("closing page store {}", self.path.display());
    }
}

impl PageStore for FileStore {
    fn read_page(&self, buf: &mut [u8], page: PageNumber) -> Result<()> {
        check_page_len(buf.len())?;
        let offset = page_offset(page)?;

        let read = read_full_at(&self.file, buf, offset)?;
        if read != PAGE_SIZE {
            return Err(StorageError::ShortRead { page, read });
        }

        Ok(())
    }

    fn write_page(&self, buf: &[u8], page: PageNumber) -> Result<()> {
        check_page_len(buf.len())?;
        let offset = page_offset(page)?;

        write_page_with(|chunk, at| pwrite(&self.file, chunk, at), buf, offset, page)
    }
}

/// Read into `buf` at `offset` until it is full or the file ends.
///
/// Returns the number of bytes read.
fn read_full_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    let mut done = 0;
    while done < buf.len() {
        match pread(file, &mut buf[done..], offset + done as u64) {
            Ok(0) => break,
            Ok(n) => done += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(done)
}

/// Write one page at `offset` through `write` until all of it lands.
///
/// A medium that accepts part of the page and then refuses the rest (by
/// returning 0 or failing, e.g. on a full disk) is a `ShortWrite`. Only a
/// failure before any byte landed is reported as `Io`.
fn write_page_with<W>(mut write: W, buf: &[u8], offset: u64, page: PageNumber) -> Result<()>
where
    W: FnMut(&[u8], u64) -> io::Result<usize>,
{
    let mut done = 0;
    while done < buf.len() {
        match write(&buf[done..], offset + done as u64) {
            Ok(0) => break,
            Ok(n) => done += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if done > 0 => {
                log::debug!("write of page {} stopped after {} bytes: {}", page, done, e);
                break;
            }
            Err(e) => return Err(StorageError::Io(e)),
        }
    }

    if done != PAGE_SIZE {
        return Err(StorageError::ShortWrite { page, written: done });
    }
    Ok(())
}

#[cfg(unix)]
fn pread(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    std::os::unix::fs::FileExt::read_at(file, buf, offset)
}

#[cfg(unix)]
fn pwrite(file: &File, buf: &[u8], offset: u64) -> io::Result<usize> {
    std::os::unix::fs::FileExt::write_at(file, buf, offset)
}

// seek_read/seek_write move the file cursor, which nothing else here relies on.
#[cfg(windows)]
fn pread(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    std::os::windows::fs::FileExt::seek_read(file, buf, offset)
}

#[cfg(windows)]
fn pwrite(file: &File, buf: &[u8], offset: u64) -> io::Result<usize> {
    std::os::windows::fs::FileExt::seek_write(file, buf, offset)
}
