//! Storage layer: page-addressed I/O.
//!
//! [`PageStore`] is the read/write contract every backing medium implements.
//! [`FileStore`] keeps one index in one file; [`MemoryStore`] keeps it in
//! memory.

mod file_store;
mod memory_store;
mod page_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use page_store::PageStore;
