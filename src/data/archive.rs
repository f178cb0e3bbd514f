//! Data Archive Module
//! Locates the raw CSV datasets, extracting them from the bundled ZIP when absent.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::ZipArchive;

/// Directory the datasets are extracted into, relative to the working directory.
pub const DATA_DIR: &str = "data";
/// Archive holding the three raw CSV files.
pub const DATA_ARCHIVE: &str = "data/data.zip";

const FLIGHTS_FILE: &str = "Flights.csv";
const TICKETS_FILE: &str = "Tickets.csv";
const AIRPORTS_FILE: &str = "Airport_Codes.csv";

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Missing data archive at {0}")]
    MissingArchive(PathBuf),
    #[error("Archive did not contain required dataset {0}")]
    IncompleteArchive(String),
    #[error("Failed to read archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Resolved locations of the three input datasets.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub flights: PathBuf,
    pub tickets: PathBuf,
    pub airports: PathBuf,
}

impl DataPaths {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            flights: data_dir.join(FLIGHTS_FILE),
            tickets: data_dir.join(TICKETS_FILE),
            airports: data_dir.join(AIRPORTS_FILE),
        }
    }

    pub fn all_present(&self) -> bool {
        self.flights.exists() && self.tickets.exists() && self.airports.exists()
    }

    fn first_missing(&self) -> Option<&'static str> {
        if !self.flights.exists() {
            Some(FLIGHTS_FILE)
        } else if !self.tickets.exists() {
            Some(TICKETS_FILE)
        } else if !self.airports.exists() {
            Some(AIRPORTS_FILE)
        } else {
            None
        }
    }
}

/// Ensure the three CSV datasets exist under `data_dir`, extracting the archive
/// when any of them is missing.
///
/// Extraction skips macOS resource-fork entries (`__MACOSX`). Fails when the
/// archive itself is missing, or when extraction still leaves a dataset absent.
pub fn ensure_extracted(archive: &Path, data_dir: &Path) -> Result<DataPaths, ArchiveError> {
    let paths = DataPaths::new(data_dir);
    if paths.all_present() {
        return Ok(paths);
    }

    if !archive.exists() {
        return Err(ArchiveError::MissingArchive(archive.to_path_buf()));
    }

    tracing::info!(archive = %archive.display(), "extracting data archive");
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(file)?;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        if entry.name().contains("__MACOSX") {
            continue;
        }
        // Reject entries escaping the extraction directory.
        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            continue;
        };
        let target = data_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
    }

    if let Some(missing) = paths.first_missing() {
        return Err(ArchiveError::IncompleteArchive(missing.to_string()));
    }
    Ok(paths)
}
