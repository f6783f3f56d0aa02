//! CSV reading and writing for dataset files

use crate::storage::schema::{ColumnMap, Field};
use crate::storage::StorageError;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Writes `records` under `header` to a CSV file at `path`
///
/// The whole file is serialized in memory and written in one call, so a
/// serialization failure never leaves a truncated file behind. Missing parent
/// directories are created.
pub fn write_records<T: Serialize>(
    path: &Path,
    header: &[&str],
    records: &[T],
) -> Result<(), StorageError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;

    tracing::debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// One data row of a raw dataset, addressed by semantic field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    values: [Option<String>; 9],
}

impl RawRow {
    /// Builds a row from field/value pairs; empty values count as absent
    pub fn new<'a>(values: impl IntoIterator<Item = (Field, &'a str)>) -> Self {
        let mut row = Self::default();
        for (field, value) in values {
            row.set(field, value);
        }
        row
    }

    fn from_record(columns: &ColumnMap, record: &csv::StringRecord) -> Self {
        let mut row = Self::default();
        for field in Field::ALL {
            if let Some(value) = columns.position(field).and_then(|i| record.get(i)) {
                row.set(field, value);
            }
        }
        row
    }

    fn set(&mut self, field: Field, value: &str) {
        self.values[field as usize] = Some(value.to_string()).filter(|v| !v.is_empty());
    }

    /// Cell value for `field`; None when the column is missing or the cell is empty
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values[field as usize].as_deref()
    }
}

/// A raw dataset loaded from disk
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Header positions resolved against the alias table
    pub columns: ColumnMap,

    pub rows: Vec<RawRow>,

    /// Lines dropped because they could not be parsed
    pub skipped: usize,
}

/// Reads a raw dataset CSV
///
/// Lines that fail to parse, or that carry more cells than the header, are
/// skipped with a warning. Lines with fewer cells read the missing ones as
/// absent.
pub fn read_raw_table(path: &Path) -> Result<RawTable, StorageError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let columns = ColumnMap::resolve(&headers);

    let mut rows = Vec::new();
    let mut skipped = 0;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Skipping malformed line in {}: {}", path.display(), e);
                skipped += 1;
                continue;
            }
        };

        if record.len() > headers.len() {
            tracing::warn!(
                "Skipping line {} in {}: expected {} fields, saw {}",
                record.position().map(|p| p.line()).unwrap_or_default(),
                path.display(),
                headers.len(),
                record.len()
            );
            skipped += 1;
            continue;
        }

        rows.push(RawRow::from_record(&columns, &record));
    }

    Ok(RawTable {
        columns,
        rows,
        skipped,
    })
}
