//! Data module - archive extraction, CSV loading and cleaning

mod archive;
mod loader;

pub use archive::{ensure_extracted, ArchiveError, DataPaths, DATA_ARCHIVE, DATA_DIR};
pub use loader::{CleanTables, DataLoader, LoaderError};
