//! JSON file implementation of RecordStore
//!
//! The whole collection lives in one pretty-printed JSON array. Every append
//! reads the file, pushes the new record and rewrites the file, so the cost of
//! an append grows with the number of stored records.
//!
//! # Recovery
//!
//! A missing file is an empty collection (first run). A file that cannot be
//! read, is not valid JSON, or is not a JSON array is also treated as empty
//! and logged; the next successful append replaces it.
//!
//! Entries of a valid array are kept as raw JSON on append, so a record
//! written by another tool or an older version survives even when it does not
//! match [`ShipmentRecord`]. [`load`](RecordStore::load) skips such entries.
//!
//! # Durability
//!
//! The collection is written to a sibling temp file, synced, renamed over the
//! data file, and the directory is synced after the rename.
//!
//! # Concurrency
//!
//! Appends through one `JsonFileStore` are serialized by an internal lock, so
//! concurrent requests in one process never drop records. Several processes
//! writing the same file are not coordinated: the last writer wins.

use crate::core::error::StoreError;
use crate::core::shipment::{NewShipment, ShipmentRecord};
use crate::core::store::RecordStore;
use async_trait::async_trait;
use chrono::Local;
use serde_json::Value;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Record store backed by a single JSON file
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store for the data file at `path`
    ///
    /// Nothing is touched on disk until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the data file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the collection is written to before it replaces the data file
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("shipments"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Directory holding the data file (`.` for a bare file name)
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Raw entries of the stored array
    async fn read_entries(&self) -> Vec<Value> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read data file, treating collection as empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Data file does not hold a JSON array, treating collection as empty"
                );
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Data file is not valid JSON, treating collection as empty"
                );
                Vec::new()
            }
        }
    }

    fn decode_entries(&self, entries: Vec<Value>) -> Vec<ShipmentRecord> {
        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        index,
                        error = %e,
                        "Skipping stored entry that is not a shipment record"
                    );
                    None
                }
            })
            .collect()
    }

    async fn write_entries(&self, entries: &[Value]) -> Result<(), StoreError> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir)
            .await
            .map_err(|source| StoreError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;

        let mut body = serde_json::to_vec_pretty(entries)?;
        body.push(b'\n');

        let temp = self.temp_path();
        if let Err(source) = write_synced(&temp, &body).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StoreError::Write { path: temp, source });
        }

        if let Err(source) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StoreError::Write {
                path: self.path.clone(),
                source,
            });
        }

        // Directories cannot be opened for syncing on every platform
        if let Ok(dir) = fs::File::open(dir).await {
            let _ = dir.sync_all().await;
        }

        Ok(())
    }
}

async fn write_synced(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(body).await?;
    file.sync_all().await
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn append(&self, shipment: NewShipment) -> Result<ShipmentRecord, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries().await;
        let record = shipment.into_record(Local::now().naive_local());
        entries.push(serde_json::to_value(&record)?);

        self.write_entries(&entries).await?;

        tracing::debug!(
            path = %self.path.display(),
            count = entries.len(),
            "Shipment collection written"
        );
        Ok(record)
    }

    async fn load(&self) -> Result<Vec<ShipmentRecord>, StoreError> {
        let entries = self.read_entries().await;
        Ok(self.decode_entries(entries))
    }
}
