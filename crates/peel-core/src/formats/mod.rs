//! Archive format implementations.

pub mod compression;
pub mod detect;
pub mod tar;
pub mod traits;

pub use tar::TarArchive;
pub use traits::ArchiveFormat;
