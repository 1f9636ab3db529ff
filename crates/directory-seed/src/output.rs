//! CSV serialization and atomic file output.
//!
//! Tables are serialized into memory first and only then written to a
//! temporary file next to the destination, which is renamed into place. A
//! failed run therefore never leaves a half-written CSV behind.

use std::io::Write;
use std::path::Path;

use serde::{Serialize, Serializer};
use tempfile::NamedTempFile;
use thiserror::Error;
use time::Date;
use tracing::info;

/// Output file for the OU table.
pub const OUS_FILE: &str = "enterprise_ous.csv";

/// Output file for the group table.
pub const GROUPS_FILE: &str = "enterprise_groups.csv";

/// Output file for the user table.
pub const USERS_FILE: &str = "enterprise_users.csv";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to move output into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// A row type with a fixed CSV header.
///
/// The header is written explicitly so that an empty table still produces a
/// header row.
pub trait CsvRecord: Serialize {
    const HEADERS: &'static [&'static str];
}

/// Serializes records, header first, into an in-memory CSV document.
pub fn to_csv_bytes<T: CsvRecord>(records: &[T]) -> Result<Vec<u8>, OutputError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(T::HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| OutputError::Io(e.into_error()))
}

/// Writes records to `path`, replacing any existing file.
///
/// Returns the number of data rows written.
pub fn write_csv<T: CsvRecord>(path: &Path, records: &[T]) -> Result<usize, OutputError> {
    let bytes = to_csv_bytes(records)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&bytes)?;
    file.as_file().sync_all()?;
    file.persist(path)?;

    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(records.len())
}

/// Writes booleans the way directory import scripts expect them.
pub fn serialize_bool<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "True" } else { "False" })
}

/// Writes dates as `YYYY-MM-DD`.
pub fn serialize_date<S: Serializer>(value: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
