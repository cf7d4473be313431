//! Types shared by extraction and inspection.
//!
//! - [`TargetDir`]: a created, canonical extraction directory
//! - [`EntryType`]: the kind of a tar entry, with its raw link target

pub mod entry_type;
pub mod target_dir;

pub use entry_type::EntryType;
pub use target_dir::TargetDir;
