//! Whole-table persistence.
//!
//! The table is the unit of persistence: `load` reads every row, `save`
//! replaces every row. Nothing is patched in place.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::inventory::normalizer::normalize;
use crate::inventory::raw::RawRow;
use crate::models::inventory::InventoryRecord;

/// Backing storage for the inventory table.
pub trait InventoryStore: Send + Sync {
    /// Reads every row, in source order, through the normalizer.
    fn load(&self) -> Result<Vec<InventoryRecord>, StorageError>;

    /// Replaces the table with `records`, all or nothing.
    fn save(&self, records: &[InventoryRecord]) -> Result<(), StorageError>;
}

/// A single CSV sheet on disk.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates a header-only table when none exists. Returns whether it did.
    pub fn ensure_exists(&self) -> Result<bool, StorageError> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        self.save(&[])?;
        info!(path = %self.path.display(), "Created empty inventory table");
        Ok(true)
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> StorageError {
        StorageError::Csv {
            path: self.path.clone(),
            source,
        }
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl InventoryStore for CsvStore {
    fn load(&self) -> Result<Vec<InventoryRecord>, StorageError> {
        let file = File::open(&self.path).map_err(|source| self.io_error(source))?;
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(file);

        let headers = reader.headers().map_err(|e| self.csv_error(e))?.clone();

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result.map_err(|e| self.csv_error(e))?;
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            records.push(normalize(&RawRow::from_cells(headers.iter(), row.iter())));
        }

        debug!(path = %self.path.display(), rows = records.len(), "Loaded inventory table");
        Ok(records)
    }

    fn save(&self, records: &[InventoryRecord]) -> Result<(), StorageError> {
        let mut tmp = NamedTempFile::new_in(self.directory()).map_err(|e| self.io_error(e))?;

        {
            let mut writer = csv::Writer::from_writer(&mut tmp);
            writer
                .write_record(InventoryRecord::headers())
                .map_err(|e| self.csv_error(e))?;
            for record in records {
                writer
                    .write_record(record.to_row())
                    .map_err(|e| self.csv_error(e))?;
            }
            writer.flush().map_err(|e| self.io_error(e))?;
        }
        tmp.flush().map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;

        // Temp files are created owner-only; keep the table's existing mode
        match std::fs::metadata(&self.path) {
            Ok(existing) => tmp
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| self.io_error(e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(self.io_error(e)),
        }

        tmp.persist(&self.path).map_err(|source| StorageError::Persist {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), rows = records.len(), "Saved inventory table");
        Ok(())
    }
}
