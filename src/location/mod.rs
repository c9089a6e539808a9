//! Location lookup table: loading, collation, and the region/locality index.

/// Spanish-locale ordering of place names.
pub mod collate;
pub mod index;
pub mod record;
/// JSON loading of the lookup table.
pub mod table;

pub use index::LookupIndex;
pub use record::{LocationRecord, composite_key};
pub use table::LocationTable;
