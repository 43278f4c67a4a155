//! Record persistence with schema validation.
//!
//! The store owns the on-disk record file for the lifetime of the
//! process: it loads and validates the record at startup and writes it
//! back exactly once on close. Unlike the per-field validators, a record
//! or schema that fails validation here is untrustworthy and the error
//! propagates to the top level with no attempt at repair.

use crate::{Error, Record, Result, Schema};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Owns the record file and the in-memory record between open and close
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    schema: Schema,
    record: Record,
}

impl RecordStore {
    /// Open a record store backed by the file at `path`.
    ///
    /// The location must name a JSON record file. The schema is loaded
    /// from `schema_path` first; a missing record file starts the store
    /// empty, while an existing one is parsed and validated against the
    /// schema before deserialization.
    pub fn open(path: impl Into<PathBuf>, schema_path: &Path) -> Result<Self> {
        let path = path.into();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            return Err(Error::InvalidLocation(format!(
                "{} is not a JSON record file",
                path.display()
            )));
        }

        let schema = Schema::load(schema_path)?;

        if !path.exists() {
            tracing::info!("No record file at {:?}, starting empty", path);
            return Ok(Self {
                path,
                schema,
                record: Record::default(),
            });
        }

        let file = File::open(&path)?;
        file.lock_shared()?;
        let mut contents = String::new();
        let read_result = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read_result?;

        let value: serde_json::Value = serde_json::from_str(&contents)?;
        schema.validate(&value)?;
        let record: Record = serde_json::from_value(value)?;

        tracing::debug!("Loaded record from {:?}", path);
        Ok(Self {
            path,
            schema,
            record,
        })
    }

    /// The record file location this store persists to
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }

    /// Empty the in-memory record. The file is untouched until close.
    pub fn clear(&mut self) {
        self.record = Record::default();
        tracing::info!("Record cleared");
    }

    /// Validate and persist the record, consuming the store.
    ///
    /// Taking the store by value makes the persist happen exactly once.
    /// A schema violation here means an in-process mutation bypassed the
    /// field validators and is reported as a fatal error.
    ///
    /// The write is atomic:
    /// 1. Serialize into a temp file in the same directory
    /// 2. Sync to disk
    /// 3. Rename over the original
    pub fn close(self) -> Result<()> {
        let value = serde_json::to_value(&self.record)?;
        self.schema.validate(&value)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let temp = NamedTempFile::new_in(dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(&value)?;
            writer.write_all(contents.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Wrote record to {:?}", self.path);
        Ok(())
    }
}
