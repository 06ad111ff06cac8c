//! Index lifecycle: naming, creation, and open handles.
//!
//! An index is a named file directly under the storage root. Creation is
//! exclusive, so concurrent requests for one name produce exactly one index.

mod catalog;
mod name;
mod registry;

pub use catalog::IndexCatalog;
pub use name::validate_index_name;
pub use registry::IndexRegistry;
